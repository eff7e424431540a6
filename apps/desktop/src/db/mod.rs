//! Local key-value persistence.

pub mod error;
pub mod schema;
pub mod store;

pub use error::DbError;
pub use store::{KeyValueStore, MemoryStore, SqliteStore};
