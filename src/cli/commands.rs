use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Overrides;

pub const MAX_WATCH_MINUTES: u64 = 7 * 24 * 60;

#[derive(Parser)]
#[command(
    name = "taskpulse",
    version,
    about = "Task tracker with completion analytics",
    after_help = "\
STORAGE:
  Tasks are kept as one JSON snapshot in a SQLite key-value table.
  Default DB: <data_dir>/taskpulse/taskpulse.db (override with --db or TASKPULSE_DB).
  Unreadable or corrupt data is treated as an empty task list.

BEHAVIOR NOTES:
  `add` with empty text or assignee adds nothing.
  `toggle`/`delete` of an unknown id change nothing.
  Day buckets in `stats` use local calendar days."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to the task database
    #[arg(long, global = true, env = "TASKPULSE_DB")]
    pub db: Option<PathBuf>,

    /// Path to config file (default: <config_dir>/taskpulse/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "TASKPULSE_LOG")]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            db_path: self.db.clone(),
            config_path: self.config.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task
    Add {
        /// Task text
        text: String,
        /// Who the task is assigned to
        #[arg(long, short)]
        assignee: String,
        /// low, medium or high
        #[arg(long, short, default_value = "medium")]
        priority: String,
    },
    /// List pending tasks
    List {
        /// Include completed tasks
        #[arg(long)]
        all: bool,
    },
    /// Mark a task complete, or pending again if already complete
    Toggle {
        id: i64,
    },
    /// Delete a task
    Delete {
        id: i64,
    },
    /// List completed tasks, most recent first
    Completed,
    /// Show task statistics
    Stats,
    /// Print completed tasks as CSV
    Export,
    /// Show live "created ... ago" times for pending tasks
    #[command(after_help = "\
NOTE:
  Times refresh on every whole minute. Stops on Ctrl-C, or after --minutes.")]
    Watch {
        /// Stop after this many minutes (at most one week)
        #[arg(long, value_parser = clap::value_parser!(u64).range(..=MAX_WATCH_MINUTES))]
        minutes: Option<u64>,
    },
}
