use serde::Serialize;

use crate::database::models::{SettingsDocument, Token};
use crate::database::Store;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::settings_patch::SettingsPatch;

/// Token and its settings, as returned by GET /resource/:id
#[derive(Debug, Clone, Serialize)]
pub struct TokenDetail {
    #[serde(flatten)]
    pub token: Token,
    pub settings: Option<SettingsDocument>,
}

/// Token operations scoped to the caller's organization
pub struct TokenService<'a> {
    store: &'a dyn Store,
    caller: &'a AuthUser,
}

impl<'a> TokenService<'a> {
    pub fn new(store: &'a dyn Store, caller: &'a AuthUser) -> Self {
        Self { store, caller }
    }

    pub async fn list(&self) -> Result<Vec<Token>, ApiError> {
        Ok(self.store.list_tokens(&self.caller.organization_id).await?)
    }

    /// Resolve a token the caller's organization owns. Missing and foreign
    /// tokens produce the same error.
    pub async fn guard(&self, token_id: &str) -> Result<Token, ApiError> {
        match self.store.find_token(&self.caller.organization_id, token_id).await? {
            Some(token) => Ok(token),
            None => {
                tracing::debug!(
                    "Token '{}' not visible to organization '{}'",
                    token_id,
                    self.caller.organization_id
                );
                Err(ApiError::not_found("Token not found"))
            }
        }
    }

    pub async fn show(&self, token_id: &str) -> Result<TokenDetail, ApiError> {
        let token = self.guard(token_id).await?;
        let settings = self.store.find_settings(&token.id).await?.map(SettingsDocument::from);
        Ok(TokenDetail { token, settings })
    }

    /// Stored settings, or the defaults for a token that was never configured
    pub async fn settings(&self, token_id: &str) -> Result<SettingsDocument, ApiError> {
        let token = self.guard(token_id).await?;
        Ok(match self.store.find_settings(&token.id).await? {
            Some(settings) => settings.into(),
            None => SettingsDocument::defaults_for(&token),
        })
    }

    pub async fn upsert_settings(&self, token_id: &str, patch: &SettingsPatch) -> Result<SettingsDocument, ApiError> {
        let token = self.guard(token_id).await?;
        let settings = self.store.upsert_settings(&token, patch).await?;

        tracing::info!(
            "Settings for token '{}' updated by user '{}' (organization '{}')",
            token.id,
            self.caller.user_id,
            self.caller.organization_id
        );
        Ok(settings.into())
    }
}
