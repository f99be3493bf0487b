//! Date, time and text formatting for rendered pages.
//!
//! Event timestamps arrive in UTC and are shown at the site's configured
//! offset. Service times are wall-clock times and are shown as-is.

use chrono::{DateTime, FixedOffset, NaiveTime, Offset, Utc};

/// The pieces of an event timestamp the event cards show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDate {
    /// Abbreviated month, e.g. `Sep`.
    pub month: String,
    /// Day of month without padding, e.g. `1`.
    pub day: String,
    /// e.g. `Monday`.
    pub weekday: String,
    /// e.g. `12:00 PM`.
    pub time: String,
    /// e.g. `Monday, September 1, 2025`.
    pub full_date: String,
}

impl EventDate {
    /// `Sep 1`
    pub fn short(&self) -> String {
        format!("{} {}", self.month, self.day)
    }
}

pub fn event_date(date: &DateTime<Utc>, offset: FixedOffset) -> EventDate {
    let local = date.with_timezone(&offset);
    EventDate {
        month: local.format("%b").to_string(),
        day: local.format("%-d").to_string(),
        weekday: local.format("%A").to_string(),
        time: local.format("%-I:%M %p").to_string(),
        full_date: local.format("%A, %B %-d, %Y").to_string(),
    }
}

/// `19:00` → `7:00 PM`
pub fn time_of_day(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Display offset from a minute count. Out-of-range values fall back to UTC.
pub fn offset_from_minutes(minutes: i32) -> FixedOffset {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix())
}

/// Non-blank lines of `text`, trimmed. Used both for multi-paragraph body
/// text and for multi-line addresses.
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}
