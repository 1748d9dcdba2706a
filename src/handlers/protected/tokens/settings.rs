use axum::{
    extract::{rejection::JsonRejection, Extension, Path, State},
    Json,
};
use serde_json::Value;

use crate::app::AppState;
use crate::database::models::SettingsDocument;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{SettingsPatch, TokenService};

/// GET /resource/:id/settings
pub async fn settings_show(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<SettingsDocument> {
    let settings = TokenService::new(state.store.as_ref(), &caller).settings(&id).await?;
    Ok(ApiResponse::success(settings))
}

/// PUT /resource/:id/settings - create on first write, shallow update after.
/// The body is validated before any storage access.
pub async fn settings_put(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<SettingsDocument> {
    let Json(body) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let patch = SettingsPatch::from_json(body)?;

    let settings = TokenService::new(state.store.as_ref(), &caller)
        .upsert_settings(&id, &patch)
        .await?;
    Ok(ApiResponse::success(settings))
}
