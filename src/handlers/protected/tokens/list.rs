use axum::extract::{Extension, State};

use crate::app::AppState;
use crate::database::models::Token;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::TokenService;

/// GET /tokens - tokens tracked by the caller's organization
pub async fn token_list(State(state): State<AppState>, Extension(caller): Extension<AuthUser>) -> ApiResult<Vec<Token>> {
    let tokens = TokenService::new(state.store.as_ref(), &caller).list().await?;
    Ok(ApiResponse::success(tokens))
}
