// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every handler here receives the caller's `AuthUser` from the middleware stack
// and reaches storage only through organization-scoped services.
pub mod tokens;
