use anyhow::Context;
use clap::Args;
use serde_json::json;

use crate::auth::{Claims, JwtKeys, Role};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config;

#[derive(Args, Debug)]
pub struct MintTokenArgs {
    #[arg(long, help = "User id (JWT subject)")]
    pub user: String,

    #[arg(long, help = "Organization id the session is scoped to")]
    pub org: String,

    #[arg(long, default_value = "MEMBER", help = "MEMBER, ADMIN or SUPER_ADMIN")]
    pub role: String,

    #[arg(long, help = "Lifetime in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
    pub hours: Option<u64>,
}

pub fn handle(args: MintTokenArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = config::config();
    anyhow::ensure!(!config.is_production(), "refusing to mint tokens in production");

    let role: Role = args.role.parse().map_err(anyhow::Error::msg)?;
    let hours = args.hours.unwrap_or(config.security.jwt_expiry_hours);
    let keys = JwtKeys::from_secret(&config.security.jwt_secret).context("JWT_SECRET is not set")?;

    let claims = Claims::new(args.user, args.org, role, hours)?;
    let token = keys.generate(&claims)?;

    match output_format {
        OutputFormat::Json => output_success(
            output_format,
            "Token issued",
            Some(json!({ "token": token, "expires_at": claims.exp })),
        ),
        OutputFormat::Text => {
            println!("{}", token);
            Ok(())
        }
    }
}
