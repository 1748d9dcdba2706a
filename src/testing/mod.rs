use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use tower::ServiceExt;

use crate::app::{self, AppState};
use crate::auth::{Claims, JwtKeys, Role};
use crate::config::AppConfig;
use crate::database::models::{Plan, Token, TokenSettings, User};
use crate::database::store::{Store, TableCount};
use crate::database::DatabaseError;
use crate::services::settings_patch::SettingsPatch;

pub const TEST_SECRET: &str = "tokenlens-test-secret";

pub const ORG_A: &str = "org-a";
pub const ORG_B: &str = "org-b";
pub const MEMBER_A: &str = "user-a";
pub const MEMBER_B: &str = "user-b";
pub const SUPER_ADMIN: &str = "user-root";
pub const TOKEN_A: &str = "tok-a";
pub const TOKEN_B: &str = "tok-b";

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    tokens: Vec<Token>,
    settings: HashMap<String, TokenSettings>,
    plans: Vec<Plan>,
    next_settings_id: usize,
}

/// In-memory `Store` mirroring the Postgres semantics
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    writes: AtomicUsize,
    /// Plan id whose update fails mid-batch, to exercise rollback
    fail_plan_update: Option<String>,
}

impl MemoryStore {
    /// Two organizations, one token each, a member in each, a super admin in
    /// org A, and plans a, b, c stored in the order c, a, b.
    pub fn seeded() -> Self {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().unwrap_or_else(Utc::now);
        let user = |id: &str, org: &str, role: Role| User {
            id: id.to_string(),
            organization_id: org.to_string(),
            email: format!("{}@tokenlens.test", id),
            role: role.as_str().to_string(),
            created_at: created,
        };
        let token = |id: &str, org: &str, chain_id: i64| Token {
            id: id.to_string(),
            organization_id: org.to_string(),
            name: format!("{} token", id),
            symbol: id.to_uppercase(),
            address: format!("0x{:0>40}", id.len()),
            chain_id,
            decimals: 18,
            created_at: created,
            updated_at: created,
        };
        let plan = |id: &str, sort_order: i32| Plan {
            id: id.to_string(),
            name: format!("Plan {}", id.to_uppercase()),
            sort_order,
        };

        let inner = Inner {
            users: vec![
                user(MEMBER_A, ORG_A, Role::Member),
                user(MEMBER_B, ORG_B, Role::Member),
                user(SUPER_ADMIN, ORG_A, Role::SuperAdmin),
            ],
            tokens: vec![token(TOKEN_A, ORG_A, 8453), token(TOKEN_B, ORG_B, 84532)],
            plans: vec![plan("a", 1), plan("b", 2), plan("c", 0)],
            ..Default::default()
        };

        Self {
            inner: RwLock::new(inner),
            ..Default::default()
        }
    }

    pub fn failing_on_plan(mut self, plan_id: &str) -> Self {
        self.fail_plan_update = Some(plan_id.to_string());
        self
    }

    /// Number of successful mutations so far
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn settings_snapshot(&self) -> HashMap<String, TokenSettings> {
        self.inner.read().await.settings.clone()
    }

    pub async fn plan_orders(&self) -> HashMap<String, i32> {
        self.inner
            .read()
            .await
            .plans
            .iter()
            .map(|p| (p.id.clone(), p.sort_order))
            .collect()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.inner.read().await.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn list_tokens(&self, organization_id: &str) -> Result<Vec<Token>, DatabaseError> {
        let inner = self.inner.read().await;
        let mut tokens: Vec<Token> = inner
            .tokens
            .iter()
            .filter(|t| t.organization_id == organization_id)
            .cloned()
            .collect();
        tokens.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(tokens)
    }

    async fn find_token(&self, organization_id: &str, token_id: &str) -> Result<Option<Token>, DatabaseError> {
        Ok(self
            .inner
            .read()
            .await
            .tokens
            .iter()
            .find(|t| t.id == token_id && t.organization_id == organization_id)
            .cloned())
    }

    async fn find_settings(&self, token_id: &str) -> Result<Option<TokenSettings>, DatabaseError> {
        Ok(self.inner.read().await.settings.get(token_id).cloned())
    }

    async fn upsert_settings(&self, token: &Token, patch: &SettingsPatch) -> Result<TokenSettings, DatabaseError> {
        let mut inner = self.inner.write().await;
        let existing = inner.settings.get(&token.id).cloned();
        let base = match existing {
            Some(existing) => existing,
            None => {
                inner.next_settings_id += 1;
                TokenSettings::defaults_for(token, format!("settings-{}", inner.next_settings_id))
            }
        };

        let updated = patch.apply(base);
        inner.settings.insert(token.id.clone(), updated.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(updated)
    }

    async fn list_plans(&self) -> Result<Vec<Plan>, DatabaseError> {
        let mut plans = self.inner.read().await.plans.clone();
        plans.sort_by(|a, b| (a.sort_order, &a.id).cmp(&(b.sort_order, &b.id)));
        Ok(plans)
    }

    async fn reorder_plans(&self, order: &[String]) -> Result<(), DatabaseError> {
        let mut inner = self.inner.write().await;

        if let Some(unknown) = order.iter().find(|id| !inner.plans.iter().any(|p| &p.id == *id)) {
            return Err(DatabaseError::UnknownPlan(unknown.clone()));
        }
        if order.len() != inner.plans.len() {
            return Err(DatabaseError::IncompleteOrder {
                given: order.len(),
                total: inner.plans.len(),
            });
        }

        // Stage on a copy and swap in only if every update succeeds
        let mut staged = inner.plans.clone();
        for (index, id) in order.iter().enumerate() {
            if self.fail_plan_update.as_deref() == Some(id.as_str()) {
                return Err(DatabaseError::Sqlx(sqlx::Error::Protocol(format!("simulated failure on {}", id))));
            }
            if let Some(plan) = staged.iter_mut().find(|p| &p.id == id) {
                plan.sort_order = index as i32;
            }
        }

        inner.plans = staged;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn data_counts(&self) -> Result<Vec<TableCount>, DatabaseError> {
        let inner = self.inner.read().await;
        let mut organizations: Vec<&str> = inner.users.iter().map(|u| u.organization_id.as_str()).collect();
        organizations.sort_unstable();
        organizations.dedup();

        let counts = [
            ("organizations", organizations.len()),
            ("users", inner.users.len()),
            ("tokens", inner.tokens.len()),
            ("token_settings", inner.settings.len()),
            ("plans", inner.plans.len()),
        ];
        Ok(counts
            .into_iter()
            .map(|(table, rows)| TableCount {
                table: table.to_string(),
                rows: rows as i64,
            })
            .collect())
    }
}

/// Router wired to an in-memory store, plus the store for assertions
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    keys: JwtKeys,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(MemoryStore::seeded())
    }

    pub fn with_store(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        let keys = JwtKeys::from_secret(TEST_SECRET).expect("test secret");
        let state = AppState::new(store.clone(), keys.clone());
        let router = app::router(state, &AppConfig::development());
        Self { router, store, keys }
    }

    /// Bearer token for a seeded user, claiming their real organization and role
    pub fn token_for(&self, user_id: &str) -> String {
        let (org, role) = match user_id {
            MEMBER_A => (ORG_A, Role::Member),
            MEMBER_B => (ORG_B, Role::Member),
            SUPER_ADMIN => (ORG_A, Role::SuperAdmin),
            other => panic!("no seeded user {}", other),
        };
        self.sign(&Claims::new(user_id, org, role, 1).unwrap())
    }

    pub fn sign(&self, claims: &Claims) -> String {
        self.keys.generate(claims).expect("sign test token")
    }

    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        let response = self.router.clone().oneshot(request).await.expect("infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, json)
    }

    pub async fn send_raw(&self, method: Method, uri: &str, token: &str, content_type: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .expect("build request");

        let response = self.router.clone().oneshot(request).await.expect("infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("read body");
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_store_hides_foreign_tokens() {
        let store = MemoryStore::seeded();
        assert!(store.find_token(ORG_A, TOKEN_A).await.unwrap().is_some());
        assert!(store.find_token(ORG_A, TOKEN_B).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn failed_reorder_leaves_plans_untouched() {
        let store = MemoryStore::seeded().failing_on_plan("b");
        let before = store.plan_orders().await;

        let order = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert!(store.reorder_plans(&order).await.is_err());
        assert_eq!(store.plan_orders().await, before);
        assert_eq!(store.writes(), 0);
    }
}
