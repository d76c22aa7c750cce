use clap::Parser;
use std::process;

use taskpulse::cli::commands::{Cli, Commands};
use taskpulse::cli::{self, finish};
use taskpulse::config::Config;

fn main() {
    let cli_args = Cli::parse();
    let json_output = cli_args.json;

    let config = match Config::load(&cli_args.overrides()) {
        Ok(config) => config,
        Err(e) => process::exit(finish(Err(e), json_output)),
    };
    init_tracing(&config.log_level);

    let result = match cli_args.command {
        Commands::Add {
            text,
            assignee,
            priority,
        } => cli::task::run_add(&config, &text, &assignee, &priority, json_output),
        Commands::List { all } => cli::task::run_list(&config, all, json_output),
        Commands::Toggle { id } => cli::task::run_toggle(&config, id, json_output),
        Commands::Delete { id } => cli::task::run_delete(&config, id, json_output),
        Commands::Completed => cli::task::run_completed(&config, json_output),
        Commands::Stats => cli::stats::run_stats(&config, json_output),
        Commands::Export => cli::stats::run_export(&config, json_output),
        Commands::Watch { minutes } => cli::watch::run_watch(&config, minutes, json_output),
    };

    process::exit(finish(result, json_output));
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_tracing(level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
