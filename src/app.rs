use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::JwtKeys;
use crate::config::{AppConfig, SecurityConfig};
use crate::database::Store;
use crate::handlers::{elevated, protected, public};
use crate::middleware::{jwt_auth_middleware, require_super_admin, validate_user_middleware};

/// Shared, immutable per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub keys: JwtKeys,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, keys: JwtKeys) -> Self {
        Self { store, keys }
    }
}

pub fn router(state: AppState, config: &AppConfig) -> Router {
    let mut app = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Protected (JWT + validated user)
        .merge(protected_routes(state.clone()))
        // Elevated (SUPER_ADMIN)
        .merge(admin_routes(state.clone()))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(TraceLayer::new_for_http());

    if config.security.enable_cors {
        app = app.layer(cors_layer(&config.security));
    }

    app
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use protected::tokens;

    // route_layer keeps unmatched paths as 404 instead of 401.
    // Layers run bottom-up: JWT first, then user validation.
    Router::new()
        .route("/tokens", get(tokens::token_list))
        .route("/resource/:id", get(tokens::token_show))
        .route(
            "/resource/:id/settings",
            get(tokens::settings_show).put(tokens::settings_put),
        )
        .route_layer(from_fn_with_state(state.clone(), validate_user_middleware))
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    use elevated::plans;

    Router::new()
        .route("/admin/plans", get(plans::plan_list))
        .route("/admin/plans/reorder", post(plans::plan_reorder))
        .route_layer(from_fn(require_super_admin))
        .route_layer(from_fn_with_state(state.clone(), validate_user_middleware))
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
