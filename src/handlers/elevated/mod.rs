// handlers/elevated/mod.rs - Elevated handlers (SUPER_ADMIN role required)
//
// Platform-wide administration that is not scoped to one organization.
pub mod plans;
