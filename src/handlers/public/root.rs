use axum::response::Json;
use serde_json::{json, Value};

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "TokenLens API",
            "version": version,
            "description": "Organization-scoped ERC20 token analytics backend",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "tokens": "/tokens (protected)",
                "resource": "/resource/:id, /resource/:id/settings (protected)",
                "admin": "/admin/plans, /admin/plans/reorder (super admin)",
            }
        }
    }))
}
