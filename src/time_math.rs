//! Pure time arithmetic for respawn windows and countdown display.
//!
//! All timestamps are local wall-clock values (`NaiveDateTime`); nothing here
//! reads the system clock, so callers always pass `now` explicitly.

use crate::error::{InputError, Result};
use chrono::{Duration, NaiveDateTime, Timelike};

const DEATH_TIME_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Accepted shapes of a datetime-local input value.
const DEATH_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Interval in which a boss may reappear. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RespawnWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Parses a raw death-time input. Blank input means the field was cleared.
pub fn parse_death_time(raw: &str) -> Result<Option<NaiveDateTime>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    DEATH_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(Some)
        .ok_or_else(|| InputError::DeathTime(raw.to_string()).into())
}

/// Renders a timestamp the way a datetime-local input holds it,
/// e.g. "2024-01-01T13:30". Seconds are dropped.
pub fn format_death_time(time: NaiveDateTime) -> String {
    time.format(DEATH_TIME_INPUT_FORMAT).to_string()
}

/// Window opens `min` minutes after death and closes `max` minutes after.
///
/// Fails when either boundary falls outside the representable date range.
pub fn compute_window(death_time: NaiveDateTime, min_minutes: u32, max_minutes: u32) -> Result<RespawnWindow> {
    let offset = |minutes: u32| {
        death_time
            .checked_add_signed(Duration::minutes(i64::from(minutes)))
            .ok_or_else(|| InputError::DeathTime(format_death_time(death_time)))
    };
    Ok(RespawnWindow {
        start: offset(min_minutes)?,
        end: offset(max_minutes)?,
    })
}

/// Time left until `target`, never negative.
pub fn remaining(target: NaiveDateTime, now: NaiveDateTime) -> Duration {
    (target - now).max(Duration::zero())
}

/// Formats as "HH:MM:SS", flooring to whole seconds. Hours are not wrapped
/// at 24.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// 12-hour wall clock, e.g. "1:05 PM". Midnight and noon show as 12.
pub fn format_clock(time: NaiveDateTime) -> String {
    let hour = time.hour();
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    let period = if hour >= 12 { "PM" } else { "AM" };
    format!("{}:{:02} {}", display_hour, time.minute(), period)
}

/// "h:mm AM - h:mm PM"; each boundary carries its own period.
pub fn format_clock_range(start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!("{} - {}", format_clock(start), format_clock(end))
}
