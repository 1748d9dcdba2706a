pub mod auth;
pub mod elevated;
pub mod response;
pub mod validate_user;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use elevated::require_super_admin;
pub use response::{ApiResponse, ApiResult};
pub use validate_user::validate_user_middleware;
