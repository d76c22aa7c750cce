use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Completion state of a task. A completion time exists only for
/// completed tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Pending,
    Completed { at: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord", into = "TaskRecord")]
pub struct Task {
    pub id: i64,
    pub text: String,
    pub priority: Priority,
    pub assigned_to: String,
    /// Epoch millis.
    pub created_at: i64,
    pub completion: Completion,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        matches!(self.completion, Completion::Completed { .. })
    }

    pub fn completed_at(&self) -> Option<i64> {
        match self.completion {
            Completion::Pending => None,
            Completion::Completed { at } => Some(at),
        }
    }

    /// Milliseconds between creation and completion, if completed.
    pub fn completion_duration_ms(&self) -> Option<i64> {
        self.completed_at().map(|at| at - self.created_at)
    }
}

/// Wire shape of a persisted task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    id: i64,
    text: String,
    completed: bool,
    #[serde(default)]
    priority: Priority,
    created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_at: Option<i64>,
    assigned_to: String,
}

impl TryFrom<TaskRecord> for Task {
    type Error = String;

    fn try_from(r: TaskRecord) -> Result<Self, Self::Error> {
        let completion = match (r.completed, r.completed_at) {
            (false, None) => Completion::Pending,
            (true, Some(at)) => Completion::Completed { at },
            (true, None) => return Err(format!("task {} is completed without completedAt", r.id)),
            (false, Some(_)) => return Err(format!("task {} is pending but has completedAt", r.id)),
        };
        Ok(Task {
            id: r.id,
            text: r.text,
            priority: r.priority,
            assigned_to: r.assigned_to,
            created_at: r.created_at,
            completion,
        })
    }
}

impl From<Task> for TaskRecord {
    fn from(t: Task) -> Self {
        TaskRecord {
            id: t.id,
            completed: t.is_completed(),
            completed_at: t.completed_at(),
            text: t.text,
            priority: t.priority,
            created_at: t.created_at,
            assigned_to: t.assigned_to,
        }
    }
}
