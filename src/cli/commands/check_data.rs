use serde_json::json;

use crate::cli::utils::{format_counts, output_success};
use crate::cli::OutputFormat;
use crate::config;
use crate::database::{DatabaseManager, PgStore, Store};

/// Print how many rows each table holds; a quick sanity check after seeding
pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&config::config().database).await?;
    let counts = PgStore::new(pool.clone()).data_counts().await?;
    pool.close().await;

    match output_format {
        OutputFormat::Json => output_success(output_format, "Row counts", Some(json!({ "tables": counts }))),
        OutputFormat::Text => {
            print!("{}", format_counts(&counts));
            Ok(())
        }
    }
}
