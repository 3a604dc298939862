pub mod manager;
pub mod memory;
pub mod models;
pub mod object_id;
pub mod postgres;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryStore;
pub use object_id::ObjectId;
pub use postgres::PgStore;
pub use store::{StoreError, TweetStore, UserStore};
