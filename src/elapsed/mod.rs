//! Human readable elapsed times ("3 hours ago") and the ticker that keeps
//! them fresh.

pub mod ticker;

use crate::clock::MINUTE_MS;

pub use ticker::{RelativeTimeTicker, TickerHandle};

pub const LESS_THAN_A_MINUTE: &str = "less than 1 minute";

/// Most significant whole unit of an elapsed duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elapsed {
    Days(i64),
    Hours(i64),
    Minutes(i64),
    UnderAMinute,
}

impl Elapsed {
    pub fn from_millis(diff_ms: i64) -> Self {
        let minutes = diff_ms.div_euclid(MINUTE_MS);
        let hours = minutes.div_euclid(60);
        let days = hours.div_euclid(24);

        if days > 0 {
            Self::Days(days)
        } else if hours > 0 {
            Self::Hours(hours)
        } else if minutes > 0 {
            Self::Minutes(minutes)
        } else {
            Self::UnderAMinute
        }
    }

    /// `"2 hours"`, `"1 day"`, or `"less than 1 minute"`.
    pub fn duration_phrase(&self) -> String {
        match *self {
            Self::Days(n) => unit(n, "day"),
            Self::Hours(n) => unit(n, "hour"),
            Self::Minutes(n) => unit(n, "minute"),
            Self::UnderAMinute => LESS_THAN_A_MINUTE.to_string(),
        }
    }

    /// `"2 hours ago"`, or `"less than 1 minute"` with no suffix.
    pub fn ago_phrase(&self) -> String {
        match self {
            Self::UnderAMinute => LESS_THAN_A_MINUTE.to_string(),
            _ => format!("{} ago", self.duration_phrase()),
        }
    }
}

fn unit(n: i64, name: &str) -> String {
    if n == 1 {
        format!("{n} {name}")
    } else {
        format!("{n} {name}s")
    }
}

/// Time since `created_at` as seen at `now`.
pub fn time_ago(created_at: i64, now: i64) -> String {
    Elapsed::from_millis(now - created_at).ago_phrase()
}

/// Time a task took from creation to completion.
pub fn time_to_complete(created_at: i64, completed_at: i64) -> String {
    Elapsed::from_millis(completed_at - created_at).duration_phrase()
}
