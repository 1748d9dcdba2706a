use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Token;

/// Stored settings row, unique per token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TokenSettings {
    pub id: String,
    pub token_id: String,
    pub display_name: Option<String>,
    pub logo_url: Option<String>,
    pub network: String,
    pub vesting_contracts: Vec<String>,
    pub excluded_addresses: Vec<String>,
    pub hide_zero_balances: bool,
}

impl TokenSettings {
    /// Values a freshly created row starts from before a patch is applied
    pub fn defaults_for(token: &Token, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            token_id: token.id.clone(),
            display_name: None,
            logo_url: None,
            network: token.default_network().as_str().to_string(),
            vesting_contracts: Vec::new(),
            excluded_addresses: Vec::new(),
            hide_zero_balances: false,
        }
    }
}

/// Client-facing view of a token's settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsDocument {
    pub token_id: String,
    pub display_name: Option<String>,
    pub logo_url: Option<String>,
    pub network: String,
    pub vesting_contracts: Vec<String>,
    pub excluded_addresses: Vec<String>,
    pub hide_zero_balances: bool,
    /// False when the token has never been configured and defaults are shown
    pub persisted: bool,
}

impl SettingsDocument {
    pub fn defaults_for(token: &Token) -> Self {
        Self {
            persisted: false,
            ..TokenSettings::defaults_for(token, String::new()).into()
        }
    }
}

impl From<TokenSettings> for SettingsDocument {
    fn from(settings: TokenSettings) -> Self {
        Self {
            token_id: settings.token_id,
            display_name: settings.display_name,
            logo_url: settings.logo_url,
            network: settings.network,
            vesting_contracts: settings.vesting_contracts,
            excluded_addresses: settings.excluded_addresses,
            hide_zero_balances: settings.hide_zero_balances,
            persisted: true,
        }
    }
}
