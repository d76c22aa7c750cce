use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::clock::{Clock, MINUTE_MS};

use super::time_ago;

const PERIOD: Duration = Duration::from_millis(MINUTE_MS as u64);

/// Re-renders "time since creation" for one task on whole-minute
/// boundaries.
pub struct RelativeTimeTicker {
    created_at: i64,
    clock: Arc<dyn Clock>,
}

impl RelativeTimeTicker {
    pub fn new(created_at: i64, clock: Arc<dyn Clock>) -> Self {
        Self { created_at, clock }
    }

    pub fn render(&self) -> String {
        time_ago(self.created_at, self.clock.now_ms())
    }

    /// Call `on_update` now, again at the next whole minute, then every
    /// minute after that until the returned handle is cancelled or dropped.
    ///
    /// Must be called from within a tokio runtime.
    pub fn activate<F>(self, mut on_update: F) -> TickerHandle
    where
        F: FnMut(String) + Send + 'static,
    {
        on_update(self.render());

        // Deadlines are fixed here, not when the task first runs.
        let first = Instant::now() + delay_to_next_minute(self.clock.now_ms());
        let created_at = self.created_at;
        let task = tokio::spawn(async move {
            tokio::time::sleep_until(first).await;
            on_update(self.render());

            let mut tick = tokio::time::interval_at(first + PERIOD, PERIOD);
            loop {
                tick.tick().await;
                on_update(self.render());
            }
        });
        debug!(created_at, "relative time ticker activated");

        TickerHandle { task: Some(task) }
    }
}

/// Time until the next whole-minute boundary of the epoch clock.
pub fn delay_to_next_minute(now_ms: i64) -> Duration {
    let next = (now_ms + MINUTE_MS - 1).div_euclid(MINUTE_MS) * MINUTE_MS;
    Duration::from_millis((next - now_ms) as u64)
}

/// Owns the scheduled work of an active ticker. Dropping it cancels.
pub struct TickerHandle {
    task: Option<JoinHandle<()>>,
}

impl TickerHandle {
    pub fn cancel(mut self) {
        self.abort();
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("relative time ticker cancelled");
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.abort();
    }
}
