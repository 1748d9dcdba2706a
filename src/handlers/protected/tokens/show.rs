use axum::extract::{Extension, Path, State};

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{TokenDetail, TokenService};

/// GET /resource/:id - a token owned by the caller's organization, with its settings
pub async fn token_show(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<TokenDetail> {
    let detail = TokenService::new(state.store.as_ref(), &caller).show(&id).await?;
    Ok(ApiResponse::success(detail))
}
