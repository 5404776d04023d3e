//! Date/time helpers in the console's business timezone
//!
//! Timestamps travel as UTC; operators enter and read wall-clock values in
//! a single configured timezone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeInputError {
    #[error("Invalid date: {0} (expected YYYY-MM-DD or RFC 3339)")]
    Date(String),
    #[error("Invalid time: {0} (expected HH:MM)")]
    Time(String),
}

/// Calendar date of `dt` in `tz` (YYYY-MM-DD)
pub fn format_date(dt: DateTime<Utc>, tz: Tz) -> String {
    dt.with_timezone(&tz).format("%Y-%m-%d").to_string()
}

/// Wall-clock time of `dt` in `tz` (HH:MM:SS)
pub fn format_time(dt: DateTime<Utc>, tz: Tz) -> String {
    dt.with_timezone(&tz).format("%H:%M:%S").to_string()
}

/// Wall-clock time of `dt` in `tz` as entered in the form (HH:MM)
pub fn format_clock(dt: DateTime<Utc>, tz: Tz) -> String {
    dt.with_timezone(&tz).format("%H:%M").to_string()
}

/// Parse an operator-entered clock time (HH:MM, seconds optional)
pub fn parse_clock(input: &str) -> Result<NaiveTime, TimeInputError> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M:%S"))
        .map_err(|_| TimeInputError::Time(input.to_string()))
}

/// Parse an operator-entered date.
///
/// RFC 3339 timestamps are taken as-is; a bare `YYYY-MM-DD` means local
/// midnight in `tz`.
pub fn parse_date_input(input: &str, tz: Tz) -> Result<DateTime<Utc>, TimeInputError> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| TimeInputError::Date(input.to_string()))?;
    Ok(local_to_utc(date.and_time(NaiveTime::MIN), tz))
}

/// Copy hour and minute onto the day of `date` (as seen in `tz`).
///
/// Seconds are cleared.
pub fn merge_clock(date: DateTime<Utc>, clock: NaiveTime, tz: Tz) -> DateTime<Utc> {
    let day = date.with_timezone(&tz).date_naive();
    let clock = clock.with_second(0).unwrap_or(clock).with_nanosecond(0).unwrap_or(clock);
    local_to_utc(day.and_time(clock), tz)
}

/// DST gap fallback: if the local time does not exist, fall back to UTC.
fn local_to_utc(naive: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    tz.from_local_datetime(&naive)
        .latest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}
