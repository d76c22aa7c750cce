use crate::db::KeyValueStore;
use crate::error::TrackerError;
use crate::models::Task;

/// Fixed key holding the JSON array of tasks.
pub const STORAGE_KEY: &str = "todos";

/// Read the persisted collection. A missing key is an empty collection;
/// unreadable or malformed data is an error for the caller to handle.
pub fn load_tasks<S: KeyValueStore>(backend: &S) -> Result<Vec<Task>, TrackerError> {
    let Some(raw) = backend.get(STORAGE_KEY)? else {
        return Ok(Vec::new());
    };
    let tasks: Vec<Task> = serde_json::from_str(&raw)?;
    // New ids are allocated above the largest stored one.
    if let Some(t) = tasks.iter().find(|t| t.id == i64::MAX) {
        return Err(TrackerError::serialization(format!(
            "task id {} is out of range",
            t.id
        )));
    }
    Ok(tasks)
}

/// Serialize the full collection and write it under [`STORAGE_KEY`].
pub fn save_tasks<S: KeyValueStore>(backend: &S, tasks: &[Task]) -> Result<(), TrackerError> {
    let raw = serde_json::to_string(tasks)?;
    backend.set(STORAGE_KEY, &raw)
}
