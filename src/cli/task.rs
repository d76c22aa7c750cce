use serde_json::json;

use crate::cli::{open_store, print_json};
use crate::config::Config;
use crate::error::TrackerError;
use crate::models::{Priority, Task};
use crate::output;
use crate::stats::completed_snapshot;

pub fn run_add(
    config: &Config,
    text: &str,
    assignee: &str,
    priority: &str,
    json_output: bool,
) -> Result<i32, TrackerError> {
    let priority =
        Priority::from_str(priority).ok_or_else(|| TrackerError::invalid_priority(priority))?;
    let mut store = open_store(config);
    let created = store.create(text, priority, assignee);
    let now = store.clock().now_ms();

    if json_output {
        print_json(&output::json::success(json!({
            "task": created.as_ref().map(|t| output::json::task_json(t, now))
        })));
    } else {
        match &created {
            Some(task) => println!("Added task: {} ({})", task.text, task.id),
            None => println!("Nothing added: text and assignee are required."),
        }
    }
    Ok(0)
}

pub fn run_list(config: &Config, all: bool, json_output: bool) -> Result<i32, TrackerError> {
    let store = open_store(config);
    let now = store.clock().now_ms();
    let tasks: Vec<&Task> = store
        .tasks()
        .iter()
        .filter(|t| all || !t.is_completed())
        .collect();

    if json_output {
        let tasks_json: Vec<_> = tasks
            .iter()
            .map(|t| output::json::task_json(t, now))
            .collect();
        print_json(&output::json::success(json!({ "tasks": tasks_json })));
    } else {
        output::text::print_task_list(&tasks, now, all);
    }
    Ok(0)
}

pub fn run_toggle(config: &Config, id: i64, json_output: bool) -> Result<i32, TrackerError> {
    let mut store = open_store(config);
    let toggled = store.toggle(id);
    let now = store.clock().now_ms();

    if json_output {
        print_json(&output::json::success(json!({
            "task": toggled.as_ref().map(|t| output::json::task_json(t, now))
        })));
    } else {
        match &toggled {
            Some(task) => {
                let state = if task.is_completed() { "completed" } else { "pending" };
                println!("Task {} → {state}", task.id);
                output::text::print_task(task, now);
            }
            None => println!("No task with id {id}."),
        }
    }
    Ok(0)
}

pub fn run_delete(config: &Config, id: i64, json_output: bool) -> Result<i32, TrackerError> {
    let mut store = open_store(config);
    let deleted = store.delete(id);

    if json_output {
        print_json(&output::json::success(json!({
            "deleted": deleted,
            "id": id
        })));
    } else if deleted {
        println!("Deleted task {id}");
    } else {
        println!("No task with id {id}.");
    }
    Ok(0)
}

pub fn run_completed(config: &Config, json_output: bool) -> Result<i32, TrackerError> {
    let store = open_store(config);
    let entries = completed_snapshot(store.tasks());

    if json_output {
        let tasks_json: Vec<_> = entries
            .iter()
            .map(output::json::completed_entry_json)
            .collect();
        print_json(&output::json::success(json!({ "tasks": tasks_json })));
    } else {
        output::text::print_completed(&entries);
    }
    Ok(0)
}
