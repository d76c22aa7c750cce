use crate::clock::MINUTE_MS;
use crate::models::Task;

/// A completed task annotated with how long it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedEntry {
    pub task: Task,
    pub completed_at: i64,
    /// Whole minutes from creation to completion, rounded.
    pub duration_minutes: i64,
}

/// Completed tasks, most recently completed first. Equal completion times
/// keep collection order.
pub fn completed_snapshot(tasks: &[Task]) -> Vec<CompletedEntry> {
    let mut entries: Vec<CompletedEntry> = tasks
        .iter()
        .filter_map(|task| {
            let completed_at = task.completed_at()?;
            Some(CompletedEntry {
                task: task.clone(),
                completed_at,
                duration_minutes: round_minutes(completed_at - task.created_at),
            })
        })
        .collect();
    entries.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
    entries
}

fn round_minutes(ms: i64) -> i64 {
    (ms as f64 / MINUTE_MS as f64).round() as i64
}
