// handlers/protected/mod.rs - Handlers behind jwt_auth_middleware
//
// Every handler here extracts `Extension<AuthUser>` and passes the caller's
// id into the service explicitly.
pub mod tweets;
pub mod users;
