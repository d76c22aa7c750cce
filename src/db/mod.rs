pub mod connection;
pub mod kv;
pub mod migrations;

pub use connection::*;
pub use kv::{KeyValueStore, MemoryStore, SqliteStore};
