use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::mpsc;
use tracing::debug;

use crate::cli::open_store;
use crate::clock::Clock;
use crate::config::Config;
use crate::elapsed::{RelativeTimeTicker, TickerHandle};
use crate::error::TrackerError;
use crate::models::Task;

pub fn run_watch(
    config: &Config,
    minutes: Option<u64>,
    json_output: bool,
) -> Result<i32, TrackerError> {
    let store = open_store(config);
    let pending: Vec<Task> = store
        .tasks()
        .iter()
        .filter(|t| !t.is_completed())
        .cloned()
        .collect();
    if pending.is_empty() {
        if !json_output {
            println!("No pending tasks.");
        }
        return Ok(0);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| TrackerError::runtime(format!("cannot start runtime: {e}")))?;
    runtime.block_on(watch(pending, store.clock(), minutes, json_output));
    Ok(0)
}

async fn watch(tasks: Vec<Task>, clock: Arc<dyn Clock>, minutes: Option<u64>, json_output: bool) {
    let (tx, mut rx) = mpsc::unbounded_channel::<(i64, String)>();
    let texts: HashMap<i64, String> = tasks.iter().map(|t| (t.id, t.text.clone())).collect();

    let handles: Vec<TickerHandle> = tasks
        .iter()
        .map(|t| {
            let tx = tx.clone();
            let id = t.id;
            RelativeTimeTicker::new(t.created_at, Arc::clone(&clock)).activate(move |created| {
                let _ = tx.send((id, created));
            })
        })
        .collect();
    drop(tx);

    let deadline = async {
        match minutes {
            Some(m) => tokio::time::sleep(Duration::from_secs(m.saturating_mul(60))).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(deadline);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            biased;
            Some((id, created)) = rx.recv() => {
                let text = texts.get(&id).map(String::as_str).unwrap_or_default();
                if json_output {
                    println!("{}", json!({ "id": id, "text": text, "created": created }));
                } else {
                    println!("{text} ({id}) - created {created}");
                }
            }
            () = &mut deadline => break,
            _ = &mut ctrl_c => break,
        }
    }

    debug!(count = handles.len(), "stopping relative time tickers");
    for handle in handles {
        handle.cancel();
    }
}
