use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A tracked ERC20 contract
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Token {
    pub id: String,
    pub organization_id: String,
    pub name: String,
    pub symbol: String,
    pub address: String,
    pub chain_id: i64,
    pub decimals: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Token {
    /// Network implied by the contract's chain, used when settings don't name one
    pub fn default_network(&self) -> Network {
        Network::from_chain_id(self.chain_id).unwrap_or(Network::BaseMainnet)
    }
}

/// Supported EVM networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    BaseMainnet,
    BaseSepolia,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::BaseMainnet => "base-mainnet",
            Network::BaseSepolia => "base-sepolia",
        }
    }

    pub fn chain_id(&self) -> i64 {
        match self {
            Network::BaseMainnet => 8453,
            Network::BaseSepolia => 84532,
        }
    }

    pub fn from_chain_id(chain_id: i64) -> Option<Self> {
        match chain_id {
            8453 => Some(Network::BaseMainnet),
            84532 => Some(Network::BaseSepolia),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "base-mainnet" => Some(Network::BaseMainnet),
            "base-sepolia" => Some(Network::BaseSepolia),
            _ => None,
        }
    }
}
