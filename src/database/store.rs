use async_trait::async_trait;
use serde::Serialize;

use crate::database::manager::DatabaseError;
use crate::database::models::{Plan, Token, TokenSettings, User};
use crate::services::settings_patch::SettingsPatch;

/// Tables reported by `check-data`, in display order
pub const COUNTED_TABLES: [&str; 5] = ["organizations", "users", "tokens", "token_settings", "plans"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCount {
    pub table: String,
    pub rows: i64,
}

/// Persistence operations the API needs. Tenant scoping happens here: token
/// lookups always take the caller's organization.
#[async_trait]
pub trait Store: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;

    async fn find_user(&self, user_id: &str) -> Result<Option<User>, DatabaseError>;

    async fn list_tokens(&self, organization_id: &str) -> Result<Vec<Token>, DatabaseError>;

    /// `None` both when the token is missing and when another organization owns it
    async fn find_token(&self, organization_id: &str, token_id: &str) -> Result<Option<Token>, DatabaseError>;

    async fn find_settings(&self, token_id: &str) -> Result<Option<TokenSettings>, DatabaseError>;

    /// Create the settings row on first write, shallow-replace supplied fields after
    async fn upsert_settings(&self, token: &Token, patch: &SettingsPatch) -> Result<TokenSettings, DatabaseError>;

    async fn list_plans(&self) -> Result<Vec<Plan>, DatabaseError>;

    /// Assign `sort_order = index` for every id, all or nothing. `order` must be a
    /// duplicate-free permutation of every plan id.
    async fn reorder_plans(&self, order: &[String]) -> Result<(), DatabaseError>;

    async fn data_counts(&self) -> Result<Vec<TableCount>, DatabaseError>;
}
