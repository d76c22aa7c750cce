use serde_json::{json, Value};

use crate::elapsed::{time_ago, time_to_complete};
use crate::error::TrackerError;
use crate::models::Task;
use crate::stats::{percent_of, CompletedEntry, TaskStats};

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &TrackerError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub fn task_json(t: &Task, now: i64) -> Value {
    let mut v = json!({
        "id": t.id,
        "text": t.text,
        "completed": t.is_completed(),
        "priority": t.priority.as_str(),
        "assigned_to": t.assigned_to,
        "created_at": t.created_at,
        "created": time_ago(t.created_at, now)
    });
    if let Some(at) = t.completed_at() {
        v["completed_at"] = json!(at);
        v["completed_in"] = json!(time_to_complete(t.created_at, at));
    }
    v
}

pub fn completed_entry_json(e: &CompletedEntry) -> Value {
    json!({
        "id": e.task.id,
        "text": e.task.text,
        "assigned_to": e.task.assigned_to,
        "priority": e.task.priority.as_str(),
        "created_at": e.task.created_at,
        "completed_at": e.completed_at,
        "duration_minutes": e.duration_minutes,
        "completed_in": time_to_complete(e.task.created_at, e.completed_at)
    })
}

pub fn stats_json(s: &TaskStats) -> Value {
    let by_priority: Vec<_> = s
        .tasks_by_priority
        .iter()
        .map(|(p, n)| {
            json!({
                "priority": p.as_str(),
                "count": n,
                "percentage": round1(percent_of(*n, s.total_tasks))
            })
        })
        .collect();
    let by_assignee: Vec<_> = s
        .tasks_by_assignee
        .iter()
        .map(|(a, n)| {
            json!({
                "assignee": a,
                "count": n,
                "percentage": round1(percent_of(*n, s.total_tasks))
            })
        })
        .collect();
    let by_day: Vec<_> = s
        .completions_by_day
        .iter()
        .map(|d| {
            json!({
                "date": d.date.to_string(),
                "label": d.label,
                "count": d.count
            })
        })
        .collect();

    json!({
        "total": s.total_tasks,
        "completed": s.completed_tasks,
        "pending": s.pending_tasks,
        "completed_percentage": round1(s.completed_percentage()),
        "pending_percentage": round1(s.pending_percentage()),
        "average_completion_minutes": s.average_completion_minutes,
        "average_completion_time": crate::stats::format_average_time(s.average_completion_minutes),
        "by_priority": by_priority,
        "by_assignee": by_assignee,
        "completions_by_day": by_day,
        "recent_completions": s.recent_completions.iter().map(completed_entry_json).collect::<Vec<_>>()
    })
}
