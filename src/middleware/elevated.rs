use axum::{extract::Request, middleware::Next, response::Response};

use super::auth::AuthUser;
use crate::error::ApiError;

/// Gate for /admin routes. Runs after user validation, so the role is the stored one.
pub async fn require_super_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(ApiError::unauthenticated)?;

    if !auth_user.role.is_super_admin() {
        tracing::warn!(
            "Denied {} {} to user '{}' with role {}",
            request.method(),
            request.uri().path(),
            auth_user.user_id,
            auth_user.role
        );
        return Err(ApiError::forbidden("Super admin access required"));
    }

    Ok(next.run(request).await)
}
