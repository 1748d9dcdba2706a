use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::auth::AuthUser;
use crate::app::AppState;
use crate::auth::Role;
use crate::error::ApiError;

/// Middleware that confirms the JWT subject still exists in the organization
/// the token claims. The stored role replaces the one in the token so
/// demotions apply without waiting for expiry.
pub async fn validate_user_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Get AuthUser from JWT middleware
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(ApiError::unauthenticated)?;

    let user = state.store.find_user(&auth_user.user_id).await?.ok_or_else(|| {
        tracing::warn!("User validation failed: user '{}' not found", auth_user.user_id);
        ApiError::unauthenticated()
    })?;

    if user.organization_id != auth_user.organization_id {
        tracing::warn!(
            "User validation failed: user '{}' belongs to '{}', token claims '{}'",
            user.id,
            user.organization_id,
            auth_user.organization_id
        );
        return Err(ApiError::unauthenticated());
    }

    let role: Role = user.role.parse().map_err(|e| {
        tracing::error!("User '{}' has an unreadable role: {}", user.id, e);
        ApiError::internal()
    })?;

    if role != auth_user.role {
        tracing::debug!("User '{}' role is {} (token said {})", user.id, role, auth_user.role);
    }

    request.extensions_mut().insert(AuthUser { role, ..auth_user });

    Ok(next.run(request).await)
}
