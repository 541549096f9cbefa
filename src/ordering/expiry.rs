//! Deadline gate and countdown.

use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// A group is expired from its deadline onwards: `now >= end_time`.
pub fn is_expired(end_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now >= end_time
}

/// What the page shows next to the active group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Countdown {
    /// No active group yet.
    #[default]
    Pending,
    Open { remaining: Duration },
    Closed,
}

impl Countdown {
    pub fn at(end_time: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if is_expired(end_time, now) {
            Countdown::Closed
        } else {
            Countdown::Open {
                remaining: end_time - now,
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Countdown::Closed)
    }
}

/// Wall-clock time of a deadline at `utc_offset_minutes`, as `HH:MM`.
pub fn deadline_text(end_time: DateTime<Utc>, utc_offset_minutes: i32) -> String {
    (end_time + Duration::minutes(i64::from(utc_offset_minutes)))
        .format("%H:%M")
        .to_string()
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Pending => write!(f, "calculating…"),
            Countdown::Closed => write!(f, "🔴 Closed"),
            Countdown::Open { remaining } => {
                let secs = remaining.num_seconds();
                write!(
                    f,
                    "⏳ {}h {:02}m {:02}s left",
                    secs / 3600,
                    (secs % 3600) / 60,
                    secs % 60
                )
            }
        }
    }
}
