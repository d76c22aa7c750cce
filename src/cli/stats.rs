use chrono::Local;

use crate::cli::{open_store, print_json};
use crate::config::Config;
use crate::error::TrackerError;
use crate::output;
use crate::stats::{completed_snapshot, TaskStats};

pub fn run_stats(config: &Config, json_output: bool) -> Result<i32, TrackerError> {
    let store = open_store(config);
    let stats = TaskStats::compute(store.tasks(), &Local::now());

    if json_output {
        print_json(&output::json::success(output::json::stats_json(&stats)));
    } else {
        output::text::print_stats(&stats);
    }
    Ok(0)
}

pub fn run_export(config: &Config, json_output: bool) -> Result<i32, TrackerError> {
    let store = open_store(config);
    let entries = completed_snapshot(store.tasks());

    if json_output {
        let rows: Vec<_> = entries
            .iter()
            .map(output::json::completed_entry_json)
            .collect();
        print_json(&output::json::success(serde_json::json!({ "rows": rows })));
    } else {
        print!("{}", output::text::export_csv(&entries, &Local)?);
    }
    Ok(0)
}
