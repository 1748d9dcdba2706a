use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    Json,
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::PlanService;

/// POST /admin/plans/reorder - body `{ "order": ["plan-id", ...] }`.
/// Position in the list becomes the plan's sort_order; applied atomically.
pub async fn plan_reorder(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(body) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let reordered = PlanService::new(state.store.as_ref()).reorder(&body).await?;
    tracing::info!("Plan order replaced by user '{}'", caller.user_id);

    Ok(ApiResponse::success(json!({ "reordered": reordered })))
}
