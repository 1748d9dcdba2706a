use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::database::TableCount;

/// Output a success message in the appropriate format
pub fn output_success(output_format: OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data_value) = data {
                response["data"] = data_value;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Render table counts as aligned text rows
pub fn format_counts(counts: &[TableCount]) -> String {
    let width = counts.iter().map(|c| c.table.len()).max().unwrap_or(0).max("TABLE".len());

    let mut out = format!("{:<width$}  {:>10}\n", "TABLE", "ROWS", width = width);
    out.push_str(&"-".repeat(width + 12));
    out.push('\n');
    for count in counts {
        out.push_str(&format!("{:<width$}  {:>10}\n", count.table, count.rows, width = width));
    }
    out
}
