//! Partial token-settings updates: parsing, validation and the shallow
//! field-replace used by every store.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::database::models::{Network, TokenSettings};

pub const MAX_DISPLAY_NAME_CHARS: usize = 64;
pub const MAX_ADDRESS_ENTRIES: usize = 100;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{0}")]
    Malformed(String),
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Validated partial update. `None` leaves the stored value untouched;
/// for nullable fields `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub display_name: Option<Option<String>>,
    pub logo_url: Option<Option<String>>,
    pub network: Option<Network>,
    pub vesting_contracts: Option<Vec<String>>,
    pub excluded_addresses: Option<Vec<String>>,
    pub hide_zero_balances: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSettingsPatch {
    #[serde(default, deserialize_with = "present")]
    display_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    logo_url: Option<Option<String>>,
    network: Option<String>,
    vesting_contracts: Option<Vec<String>>,
    excluded_addresses: Option<Vec<String>>,
    hide_zero_balances: Option<bool>,
}

/// Distinguishes an explicit `null` from an absent key
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl SettingsPatch {
    /// Parse and validate a request body
    pub fn from_json(body: Value) -> Result<Self, SettingsError> {
        if !body.is_object() {
            return Err(SettingsError::Malformed("Settings body must be a JSON object".to_string()));
        }

        let raw: RawSettingsPatch =
            serde_json::from_value(body).map_err(|e| SettingsError::Malformed(format!("Invalid settings body: {}", e)))?;

        Ok(Self {
            display_name: raw.display_name.map(|v| v.map(validate_display_name).transpose()).transpose()?,
            logo_url: raw.logo_url.map(|v| v.map(validate_logo_url).transpose()).transpose()?,
            network: raw.network.map(validate_network).transpose()?,
            vesting_contracts: raw
                .vesting_contracts
                .map(|list| normalize_addresses("vesting_contracts", list))
                .transpose()?,
            excluded_addresses: raw
                .excluded_addresses
                .map(|list| normalize_addresses("excluded_addresses", list))
                .transpose()?,
            hide_zero_balances: raw.hide_zero_balances,
        })
    }

    /// Shallow replace of every supplied field
    pub fn apply(&self, mut settings: TokenSettings) -> TokenSettings {
        if let Some(display_name) = &self.display_name {
            settings.display_name = display_name.clone();
        }
        if let Some(logo_url) = &self.logo_url {
            settings.logo_url = logo_url.clone();
        }
        if let Some(network) = self.network {
            settings.network = network.as_str().to_string();
        }
        if let Some(vesting_contracts) = &self.vesting_contracts {
            settings.vesting_contracts = vesting_contracts.clone();
        }
        if let Some(excluded_addresses) = &self.excluded_addresses {
            settings.excluded_addresses = excluded_addresses.clone();
        }
        if let Some(hide_zero_balances) = self.hide_zero_balances {
            settings.hide_zero_balances = hide_zero_balances;
        }
        settings
    }
}

fn validate_display_name(name: String) -> Result<String, SettingsError> {
    let trimmed = name.trim();
    let chars = trimmed.chars().count();
    if chars == 0 || chars > MAX_DISPLAY_NAME_CHARS {
        return Err(SettingsError::InvalidField {
            field: "display_name",
            reason: format!("must be 1 to {} characters", MAX_DISPLAY_NAME_CHARS),
        });
    }
    Ok(trimmed.to_string())
}

fn validate_logo_url(raw: String) -> Result<String, SettingsError> {
    let trimmed = raw.trim();
    match url::Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(trimmed.to_string()),
        _ => Err(SettingsError::InvalidField {
            field: "logo_url",
            reason: "must be an absolute http(s) URL".to_string(),
        }),
    }
}

fn validate_network(raw: String) -> Result<Network, SettingsError> {
    Network::parse(&raw).ok_or_else(|| SettingsError::InvalidField {
        field: "network",
        reason: format!("unsupported network '{}'", raw),
    })
}

/// Lowercases EVM addresses and drops repeats, keeping first occurrence
fn normalize_addresses(field: &'static str, list: Vec<String>) -> Result<Vec<String>, SettingsError> {
    if list.len() > MAX_ADDRESS_ENTRIES {
        return Err(SettingsError::InvalidField {
            field,
            reason: format!("at most {} addresses allowed", MAX_ADDRESS_ENTRIES),
        });
    }

    let mut normalized: Vec<String> = Vec::with_capacity(list.len());
    for raw in list {
        let address = normalize_address(&raw).ok_or_else(|| SettingsError::InvalidField {
            field,
            reason: format!("'{}' is not a 0x-prefixed 40 hex digit address", raw),
        })?;
        if !normalized.contains(&address) {
            normalized.push(address);
        }
    }
    Ok(normalized)
}

pub fn normalize_address(raw: &str) -> Option<String> {
    let hex = raw.trim().strip_prefix("0x")?;
    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(format!("0x{}", hex.to_ascii_lowercase()))
}
