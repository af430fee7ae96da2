//! Wall-clock access

use chrono::{DateTime, Local, NaiveDateTime, Utc};

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Current instant
    fn now_utc(&self) -> DateTime<Utc>;

    /// Current wall-clock time in the host's local timezone
    fn now_local(&self) -> NaiveDateTime;
}

/// Clock backed by the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn now_local(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Format a wall-clock time as a zero-padded 12-hour time, e.g. `02:05 PM`
#[must_use]
pub fn format_12h(time: &NaiveDateTime) -> String {
    time.format("%I:%M %p").to_string()
}
