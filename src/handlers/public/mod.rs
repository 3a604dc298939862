// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition (register, login, refresh) and read-only tweet listing.
pub mod tweets;
pub mod users;
