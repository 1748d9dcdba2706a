use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::auth::{Claims, Role};
use crate::error::ApiError;

/// Authenticated caller and the organization every query is scoped to
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: String,
    pub organization_id: String,
    pub role: Role,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            organization_id: claims.org,
            role: claims.role,
        }
    }
}

/// JWT authentication middleware that validates tokens and extracts user context.
/// Every failure yields the same 401 body; the reason only goes to the log.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(request.headers()).map_err(|reason| {
        tracing::debug!("Rejecting request to {}: {}", request.uri().path(), reason);
        ApiError::unauthenticated()
    })?;

    let claims = state.keys.validate(&token).map_err(|e| {
        tracing::debug!("Rejecting request to {}: {}", request.uri().path(), e);
        ApiError::unauthenticated()
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, &'static str> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or("Missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        Some(_) => Err("Empty JWT token"),
        None => Err("Authorization header must use Bearer token format"),
    }
}
