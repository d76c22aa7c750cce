use std::sync::Arc;

use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::db::KeyValueStore;
use crate::models::{Completion, Priority, Task};
use crate::persist;

/// Owner of the task collection.
///
/// Mutations commit in memory first and then write the whole collection to
/// the backend. A failed write is logged and otherwise ignored: the
/// in-memory state stays authoritative for the rest of the session.
pub struct TaskStore<S: KeyValueStore> {
    backend: S,
    clock: Arc<dyn Clock>,
    tasks: Vec<Task>,
    last_id: i64,
}

impl<S: KeyValueStore> TaskStore<S> {
    pub fn open(backend: S) -> Self {
        Self::with_clock(backend, Arc::new(SystemClock))
    }

    pub fn with_clock(backend: S, clock: Arc<dyn Clock>) -> Self {
        let tasks = load(&backend);
        let last_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        Self {
            backend,
            clock,
            tasks,
            last_id,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Create a pending task. Returns `None` when the trimmed text or
    /// assignee is empty.
    pub fn create(&mut self, text: &str, priority: Priority, assigned_to: &str) -> Option<Task> {
        let text = text.trim();
        let assigned_to = assigned_to.trim();
        if text.is_empty() || assigned_to.is_empty() {
            debug!("rejected task with empty text or assignee");
            return None;
        }

        // Time based, but never reused within a session. i64::MAX stays
        // unallocated so the stored snapshot always loads back.
        let Some(next) = self.last_id.checked_add(1).filter(|n| *n < i64::MAX) else {
            warn!(last_id = self.last_id, "task ids exhausted");
            return None;
        };
        let now = self.clock.now_ms();
        let id = now.max(next);
        self.last_id = id;

        let task = Task {
            id,
            text: text.to_string(),
            priority,
            assigned_to: assigned_to.to_string(),
            created_at: now,
            completion: Completion::Pending,
        };
        self.tasks.push(task.clone());
        debug!(id, "created task");
        self.persist();
        Some(task)
    }

    /// Flip the completion state of `id`. Returns the updated task, or
    /// `None` if no task has that id.
    pub fn toggle(&mut self, id: i64) -> Option<Task> {
        let now = self.clock.now_ms();
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completion = match task.completion {
            Completion::Pending => Completion::Completed { at: now },
            Completion::Completed { .. } => Completion::Pending,
        };
        let updated = task.clone();
        debug!(id, completed = updated.is_completed(), "toggled task");
        self.persist();
        Some(updated)
    }

    /// Remove `id`. Returns `false` if no task has that id.
    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return false;
        }
        debug!(id, "deleted task");
        self.persist();
        true
    }

    fn persist(&self) {
        if let Err(e) = persist::save_tasks(&self.backend, &self.tasks) {
            warn!(code = e.code.as_str(), error = %e, "failed to save tasks");
        }
    }
}

/// Read the persisted collection, falling back to empty on any failure.
pub fn load<S: KeyValueStore>(backend: &S) -> Vec<Task> {
    match persist::load_tasks(backend) {
        Ok(tasks) => tasks,
        Err(e) => {
            warn!(code = e.code.as_str(), error = %e, "failed to load tasks, starting empty");
            Vec::new()
        }
    }
}
