use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub organization_id: String,
    pub email: String,
    /// MEMBER, ADMIN or SUPER_ADMIN; parsed into `auth::Role` at the edge
    pub role: String,
    pub created_at: DateTime<Utc>,
}
