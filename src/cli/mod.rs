pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "tokenlens")]
#[command(about = "TokenLens - organization-scoped ERC20 analytics API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP API server")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides TOKENLENS_PORT / PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Apply embedded database migrations")]
    Migrate,

    #[command(about = "Print row counts for every table")]
    CheckData,

    #[command(about = "Issue a signed session token for local development")]
    MintToken(commands::mint_token::MintTokenArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Serve { port } => commands::serve::handle(port).await,
        Commands::Migrate => commands::migrate::handle(output_format).await,
        Commands::CheckData => commands::check_data::handle(output_format).await,
        Commands::MintToken(args) => commands::mint_token::handle(args, output_format),
    }
}
