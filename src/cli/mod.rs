pub mod commands;
pub mod stats;
pub mod task;
pub mod watch;

pub use commands::*;

use serde_json::Value;
use tracing::warn;

use crate::config::Config;
use crate::db::{connection, KeyValueStore, MemoryStore, SqliteStore};
use crate::error::TrackerError;
use crate::output;
use crate::store::TaskStore;

pub type CliStore = TaskStore<Box<dyn KeyValueStore>>;

/// Open the task store over the configured database. If the database
/// cannot be opened the session runs on a throwaway in-memory backend.
pub fn open_store(config: &Config) -> CliStore {
    let backend: Box<dyn KeyValueStore> = match connection::open_db(&config.db_path) {
        Ok(conn) => Box::new(SqliteStore::new(conn)),
        Err(e) => {
            warn!(
                path = %config.db_path.display(),
                error = %e,
                "cannot open task database, changes will not be saved"
            );
            Box::new(MemoryStore::new())
        }
    };
    TaskStore::open(backend)
}

pub fn print_json(v: &Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
    );
}

/// Report an error (if any) and turn the result into an exit code.
pub fn finish(result: Result<i32, TrackerError>, json_output: bool) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            if json_output {
                print_json(&output::json::error(&e));
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}
