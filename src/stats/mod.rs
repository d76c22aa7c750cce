//! Aggregates derived from a snapshot of the task collection.
//!
//! Everything here is a pure function of its inputs: the same snapshot and
//! the same `now` always produce the same statistics.

pub mod export;
pub mod histogram;

use chrono::{DateTime, TimeZone};

use crate::clock::MINUTE_MS;
use crate::models::{Priority, Task};

pub use export::{completed_snapshot, CompletedEntry};
pub use histogram::{completions_by_day, DayCount, WINDOW_DAYS};

/// Label used for tasks with an empty assignee.
pub const UNASSIGNED: &str = "unassigned";

/// Number of completions shown in the "recent completions" list.
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct TaskStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
    pub average_completion_minutes: f64,
    /// In order of first occurrence.
    pub tasks_by_priority: Vec<(Priority, usize)>,
    /// Descending by count; ties keep first occurrence order.
    pub tasks_by_assignee: Vec<(String, usize)>,
    pub completions_by_day: Vec<DayCount>,
    pub recent_completions: Vec<CompletedEntry>,
}

impl TaskStats {
    pub fn compute<Tz: TimeZone>(tasks: &[Task], now: &DateTime<Tz>) -> Self {
        let total_tasks = tasks.len();
        let completed_tasks = tasks.iter().filter(|t| t.is_completed()).count();
        let mut recent_completions = completed_snapshot(tasks);
        recent_completions.truncate(RECENT_LIMIT);

        Self {
            total_tasks,
            completed_tasks,
            pending_tasks: total_tasks - completed_tasks,
            average_completion_minutes: average_completion_minutes(tasks),
            tasks_by_priority: tasks_by_priority(tasks),
            tasks_by_assignee: tasks_by_assignee(tasks),
            completions_by_day: completions_by_day(tasks, now),
            recent_completions,
        }
    }

    pub fn completed_percentage(&self) -> f64 {
        percent_of(self.completed_tasks, self.total_tasks)
    }

    pub fn pending_percentage(&self) -> f64 {
        percent_of(self.pending_tasks, self.total_tasks)
    }
}

/// Mean minutes from creation to completion over completed tasks, `0.0`
/// when nothing is completed.
pub fn average_completion_minutes(tasks: &[Task]) -> f64 {
    let durations: Vec<i64> = tasks.iter().filter_map(Task::completion_duration_ms).collect();
    if durations.is_empty() {
        return 0.0;
    }
    let total_minutes: f64 = durations.iter().map(|&ms| ms as f64 / MINUTE_MS as f64).sum();
    total_minutes / durations.len() as f64
}

pub fn tasks_by_priority(tasks: &[Task]) -> Vec<(Priority, usize)> {
    let mut counts: Vec<(Priority, usize)> = Vec::new();
    for task in tasks {
        match counts.iter_mut().find(|(p, _)| *p == task.priority) {
            Some((_, n)) => *n += 1,
            None => counts.push((task.priority, 1)),
        }
    }
    counts
}

pub fn tasks_by_assignee(tasks: &[Task]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for task in tasks {
        let assignee = if task.assigned_to.is_empty() {
            UNASSIGNED
        } else {
            task.assigned_to.as_str()
        };
        match counts.iter_mut().find(|(a, _)| a == assignee) {
            Some((_, n)) => *n += 1,
            None => counts.push((assignee.to_string(), 1)),
        }
    }
    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// `part` as a percentage of `total`; `0.0` for an empty total.
pub fn percent_of(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

pub fn format_average_time(minutes: f64) -> String {
    if minutes < 60.0 {
        return format!("{} minutes", minutes.round() as i64);
    }
    format!("{:.1} hours", minutes / 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Completion;
    use chrono::Utc;

    const T0: i64 = 1_700_000_000_000;

    fn task(id: i64, priority: Priority, assignee: &str, done_after_min: Option<i64>) -> Task {
        Task {
            id,
            text: format!("task {id}"),
            priority,
            assigned_to: assignee.to_string(),
            created_at: T0,
            completion: match done_after_min {
                Some(m) => Completion::Completed { at: T0 + m * MINUTE_MS },
                None => Completion::Pending,
            },
        }
    }

    #[test]
    fn test_counts_add_up() {
        let tasks = vec![
            task(1, Priority::High, "Ana", Some(10)),
            task(2, Priority::Low, "Bob", None),
            task(3, Priority::Low, "Ana", Some(30)),
        ];
        let stats = TaskStats::compute(&tasks, &Utc::now());
        assert_eq!(stats.total_tasks, 3);
        assert_eq!(stats.completed_tasks, 2);
        assert_eq!(stats.pending_tasks + stats.completed_tasks, stats.total_tasks);
        assert_eq!(stats.average_completion_minutes, 20.0);
    }

    #[test]
    fn test_average_zero_without_completions() {
        let tasks = vec![task(1, Priority::Medium, "Ana", None)];
        assert_eq!(average_completion_minutes(&tasks), 0.0);
        assert_eq!(average_completion_minutes(&[]), 0.0);
    }

    #[test]
    fn test_empty_snapshot_percentages_are_zero() {
        let stats = TaskStats::compute(&[], &Utc::now());
        assert_eq!(stats.completed_percentage(), 0.0);
        assert_eq!(stats.pending_percentage(), 0.0);
        assert!(stats.tasks_by_priority.is_empty());
        assert_eq!(stats.completions_by_day.len(), WINDOW_DAYS);
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(1, 4), 25.0);
        assert_eq!(percent_of(0, 0), 0.0);
    }

    #[test]
    fn test_priority_distribution_first_occurrence_order() {
        let tasks = vec![
            task(1, Priority::Low, "a", None),
            task(2, Priority::High, "a", Some(1)),
            task(3, Priority::Low, "a", None),
        ];
        assert_eq!(
            tasks_by_priority(&tasks),
            vec![(Priority::Low, 2), (Priority::High, 1)]
        );
    }

    #[test]
    fn test_assignee_distribution_sorted_with_stable_ties() {
        let tasks = vec![
            task(1, Priority::Low, "Carol", None),
            task(2, Priority::Low, "Bob", None),
            task(3, Priority::Low, "", None),
            task(4, Priority::Low, "Bob", None),
            task(5, Priority::Low, "Dave", None),
        ];
        assert_eq!(
            tasks_by_assignee(&tasks),
            vec![
                ("Bob".to_string(), 2),
                ("Carol".to_string(), 1),
                (UNASSIGNED.to_string(), 1),
                ("Dave".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_format_average_time() {
        assert_eq!(format_average_time(45.0), "45 minutes");
        assert_eq!(format_average_time(90.0), "1.5 hours");
        assert_eq!(format_average_time(0.0), "0 minutes");
        assert_eq!(format_average_time(60.0), "1.0 hours");
    }

    #[test]
    fn test_recent_completions_limited() {
        let tasks: Vec<Task> = (0..8)
            .map(|i| task(i, Priority::Medium, "a", Some(i)))
            .collect();
        let stats = TaskStats::compute(&tasks, &Utc::now());
        assert_eq!(stats.recent_completions.len(), RECENT_LIMIT);
        assert_eq!(stats.recent_completions[0].task.id, 7);
    }
}
