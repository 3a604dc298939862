// handlers/mod.rs - handlers grouped by security tier
//
// Public (no auth) → Protected (access token required)
pub mod protected; // Requires jwt_auth_middleware, receives AuthUser
pub mod public;    // No authentication
pub mod system;    // Root and health endpoints

pub(crate) mod cookies;
