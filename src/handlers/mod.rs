// handlers/mod.rs - 3-tier handler layout
//
// Public (no auth) → Protected (JWT + validated user, organization scoped)
// → Elevated (SUPER_ADMIN only)
pub mod elevated; // /admin/*
pub mod protected; // /tokens, /resource/*
pub mod public; // /, /health
