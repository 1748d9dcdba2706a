use axum::extract::State;

use crate::app::AppState;
use crate::database::models::Plan;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::PlanService;

/// GET /admin/plans - plans in display order
pub async fn plan_list(State(state): State<AppState>) -> ApiResult<Vec<Plan>> {
    let plans = PlanService::new(state.store.as_ref()).list().await?;
    Ok(ApiResponse::success(plans))
}
