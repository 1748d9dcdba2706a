use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Plan, Token, TokenSettings, User};
use crate::database::store::{Store, TableCount, COUNTED_TABLES};
use crate::services::settings_patch::SettingsPatch;

const TOKEN_COLUMNS: &str = "id, organization_id, name, symbol, address, chain_id, decimals, created_at, updated_at";

const SETTINGS_COLUMNS: &str =
    "id, token_id, display_name, logo_url, network, vesting_contracts, excluded_addresses, hide_zero_balances";

/// Single statement so concurrent first writes cannot race into two rows.
/// Nullable columns carry a "was supplied" flag so an explicit null clears them.
const UPSERT_SETTINGS: &str = r#"
    INSERT INTO token_settings AS s
        (id, token_id, display_name, logo_url, network, vesting_contracts, excluded_addresses, hide_zero_balances)
    VALUES (
        $1, $2, $3, $5,
        COALESCE($7, $11),
        COALESCE($8, ARRAY[]::text[]),
        COALESCE($9, ARRAY[]::text[]),
        COALESCE($10, false)
    )
    ON CONFLICT (token_id) DO UPDATE SET
        display_name = CASE WHEN $4 THEN EXCLUDED.display_name ELSE s.display_name END,
        logo_url = CASE WHEN $6 THEN EXCLUDED.logo_url ELSE s.logo_url END,
        network = COALESCE($7, s.network),
        vesting_contracts = COALESCE($8, s.vesting_contracts),
        excluded_addresses = COALESCE($9, s.excluded_addresses),
        hide_zero_balances = COALESCE($10, s.hide_zero_balances)
    RETURNING id, token_id, display_name, logo_url, network, vesting_contracts, excluded_addresses, hide_zero_balances
"#;

/// Postgres-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, organization_id, email, role, created_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_tokens(&self, organization_id: &str) -> Result<Vec<Token>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM tokens WHERE organization_id = $1 ORDER BY created_at, id",
            TOKEN_COLUMNS
        );
        let tokens = sqlx::query_as::<_, Token>(&sql)
            .bind(organization_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(tokens)
    }

    async fn find_token(&self, organization_id: &str, token_id: &str) -> Result<Option<Token>, DatabaseError> {
        // Ownership is part of the lookup so a foreign row is never loaded
        let sql = format!(
            "SELECT {} FROM tokens WHERE id = $1 AND organization_id = $2",
            TOKEN_COLUMNS
        );
        let token = sqlx::query_as::<_, Token>(&sql)
            .bind(token_id)
            .bind(organization_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(token)
    }

    async fn find_settings(&self, token_id: &str) -> Result<Option<TokenSettings>, DatabaseError> {
        let sql = format!("SELECT {} FROM token_settings WHERE token_id = $1", SETTINGS_COLUMNS);
        let settings = sqlx::query_as::<_, TokenSettings>(&sql)
            .bind(token_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(settings)
    }

    async fn upsert_settings(&self, token: &Token, patch: &SettingsPatch) -> Result<TokenSettings, DatabaseError> {
        let settings = sqlx::query_as::<_, TokenSettings>(UPSERT_SETTINGS)
            .bind(Uuid::new_v4().to_string())
            .bind(&token.id)
            .bind(patch.display_name.clone().flatten())
            .bind(patch.display_name.is_some())
            .bind(patch.logo_url.clone().flatten())
            .bind(patch.logo_url.is_some())
            .bind(patch.network.map(|n| n.as_str()))
            .bind(patch.vesting_contracts.clone())
            .bind(patch.excluded_addresses.clone())
            .bind(patch.hide_zero_balances)
            .bind(token.default_network().as_str())
            .fetch_one(&self.pool)
            .await?;

        debug!("Upserted settings {} for token {}", settings.id, token.id);
        Ok(settings)
    }

    async fn list_plans(&self) -> Result<Vec<Plan>, DatabaseError> {
        let plans = sqlx::query_as::<_, Plan>("SELECT id, name, sort_order FROM plans ORDER BY sort_order, id")
            .fetch_all(&self.pool)
            .await?;

        Ok(plans)
    }

    async fn reorder_plans(&self, order: &[String]) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        // Blocks concurrent inserts as well as updates, so the membership
        // check and the writes see the same set of plans
        sqlx::query("LOCK TABLE plans IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let existing: Vec<String> = sqlx::query_scalar("SELECT id FROM plans")
            .fetch_all(&mut *tx)
            .await?;
        let existing: HashSet<String> = existing.into_iter().collect();

        if let Some(unknown) = order.iter().find(|id| !existing.contains(*id)) {
            warn!("Plan reorder rejected: unknown plan '{}'", unknown);
            return Err(DatabaseError::UnknownPlan(unknown.clone()));
        }
        if order.len() != existing.len() {
            warn!("Plan reorder rejected: {} of {} plans listed", order.len(), existing.len());
            return Err(DatabaseError::IncompleteOrder {
                given: order.len(),
                total: existing.len(),
            });
        }

        for (index, id) in order.iter().enumerate() {
            // Any failure here drops `tx`, which rolls the whole batch back
            let result = sqlx::query("UPDATE plans SET sort_order = $1 WHERE id = $2")
                .bind(index as i32)
                .bind(id)
                .execute(&mut *tx)
                .await?;

            if result.rows_affected() != 1 {
                return Err(DatabaseError::UnknownPlan(id.clone()));
            }
        }

        tx.commit().await?;
        Ok(())
    }

    async fn data_counts(&self) -> Result<Vec<TableCount>, DatabaseError> {
        let mut counts = Vec::with_capacity(COUNTED_TABLES.len());
        for table in COUNTED_TABLES {
            let sql = format!("SELECT COUNT(*) FROM {}", DatabaseManager::quote_identifier(table));
            let rows: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
            counts.push(TableCount {
                table: table.to_string(),
                rows,
            });
        }
        Ok(counts)
    }
}
