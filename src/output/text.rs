use std::fmt::Display;

use chrono::TimeZone;
use csv::Writer;

use crate::elapsed::{time_ago, time_to_complete};
use crate::error::TrackerError;
use crate::models::Task;
use crate::stats::{format_average_time, percent_of, CompletedEntry, TaskStats};

pub fn print_task(t: &Task, now: i64) {
    println!("Task: {} ({})", t.text, t.id);
    println!("  Priority: {}", t.priority.as_str());
    println!("  Assigned to: {}", t.assigned_to);
    println!("  Created: {}", time_ago(t.created_at, now));
    if let Some(at) = t.completed_at() {
        println!("  Completed in: {}", time_to_complete(t.created_at, at));
    }
}

pub fn print_task_list(tasks: &[&Task], now: i64, all: bool) {
    if tasks.is_empty() {
        println!("{}", if all { "No tasks." } else { "No pending tasks." });
        return;
    }
    for t in tasks {
        let mark = if t.is_completed() { "x" } else { " " };
        println!(
            "  [{mark}] {} ({}) p={} @{} - created {}",
            t.text,
            t.id,
            t.priority.as_str(),
            t.assigned_to,
            time_ago(t.created_at, now)
        );
    }
}

pub fn print_completed(entries: &[CompletedEntry]) {
    if entries.is_empty() {
        println!("No completed tasks.");
        return;
    }
    for e in entries {
        println!(
            "  {} ({}) - completed in {}",
            e.task.text,
            e.task.id,
            time_to_complete(e.task.created_at, e.completed_at)
        );
    }
}

pub fn print_stats(s: &TaskStats) {
    println!("Total tasks: {}", s.total_tasks);
    println!(
        "Completed: {} ({:.1}% of total)",
        s.completed_tasks,
        s.completed_percentage()
    );
    println!(
        "Pending: {} ({:.1}% of total)",
        s.pending_tasks,
        s.pending_percentage()
    );
    println!(
        "Average time to complete: {}",
        format_average_time(s.average_completion_minutes)
    );

    println!("\nBy priority:");
    for (p, n) in &s.tasks_by_priority {
        println!(
            "  {:<8} {n} tasks ({:.1}%)",
            p.as_str(),
            percent_of(*n, s.total_tasks)
        );
    }

    println!("\nBy assignee:");
    for (a, n) in &s.tasks_by_assignee {
        println!("  {a:<12} {n} tasks ({:.1}%)", percent_of(*n, s.total_tasks));
    }

    println!("\nCompleted per day:");
    for d in &s.completions_by_day {
        println!("  {:>6} {:>3} {}", d.label, d.count, "#".repeat(d.count));
    }

    if !s.recent_completions.is_empty() {
        println!("\nRecent completions:");
        for e in &s.recent_completions {
            println!(
                "  {} - {} min ({})",
                e.task.text,
                e.duration_minutes,
                format_average_time(e.duration_minutes as f64)
            );
        }
    }
}

pub const CSV_HEADER: [&str; 8] = [
    "Task",
    "Assigned to",
    "Priority",
    "Created date",
    "Created time",
    "Completed date",
    "Completed time",
    "Duration (minutes)",
];

/// Render the completed snapshot as CSV, dates and times in `tz`.
pub fn export_csv<Tz>(entries: &[CompletedEntry], tz: &Tz) -> Result<String, TrackerError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for e in entries {
        let (created_date, created_time) = date_time(tz, e.task.created_at);
        let (completed_date, completed_time) = date_time(tz, e.completed_at);
        let duration = e.duration_minutes.to_string();
        writer.write_record([
            e.task.text.as_str(),
            e.task.assigned_to.as_str(),
            e.task.priority.as_str(),
            created_date.as_str(),
            created_time.as_str(),
            completed_date.as_str(),
            completed_time.as_str(),
            duration.as_str(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| TrackerError::serialization(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TrackerError::serialization(e.to_string()))
}

fn date_time<Tz>(tz: &Tz, ms: i64) -> (String, String)
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match tz.timestamp_millis_opt(ms).single() {
        Some(dt) => (
            dt.format("%Y-%m-%d").to_string(),
            dt.format("%H:%M:%S").to_string(),
        ),
        None => (String::new(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MINUTE_MS;
    use crate::models::{Completion, Priority};
    use crate::stats::completed_snapshot;
    use chrono::Utc;

    #[test]
    fn test_export_csv_rows() {
        let created = 1_710_000_000_000; // 2024-03-09 16:00:00 UTC
        let tasks = vec![Task {
            id: 1,
            text: "Write, \"spec\"".into(),
            priority: Priority::High,
            assigned_to: "Ana".into(),
            created_at: created,
            completion: Completion::Completed {
                at: created + 45 * MINUTE_MS,
            },
        }];
        let csv = export_csv(&completed_snapshot(&tasks), &Utc).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER.join(","));
        assert_eq!(
            lines[1],
            "\"Write, \"\"spec\"\"\",Ana,high,2024-03-09,16:00:00,2024-03-09,16:45:00,45"
        );
    }

    #[test]
    fn test_export_csv_empty() {
        let csv = export_csv(&[], &Utc).unwrap();
        assert_eq!(csv, format!("{}\n", CSV_HEADER.join(",")));
    }
}
