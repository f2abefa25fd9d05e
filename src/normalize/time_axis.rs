//! Time-axis reconstruction for profile rows
//!
//! Argo positions time as fractional days since 1950-01-01T00:00:00Z
//! ("JULD"). Rows without JULD fall back to a calendar date column, and as a
//! last resort to the cycle number, which keeps ordering usable but carries
//! no calendar meaning.

use super::fields::{LogicalField, parse_number, resolve, resolve_number};
use crate::constants::{EPOCH_1950_UNIX_MS, MIN_DATE_DIGITS, MS_PER_DAY};
use crate::parser::RawRow;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Ordering value and calendar instant recovered from one row
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeAxis {
    pub time_value: Option<f64>,
    pub date_iso: Option<String>,
}

impl TimeAxis {
    fn from_instant(instant: DateTime<Utc>) -> Self {
        Self {
            time_value: Some(instant_to_julian_day(instant)),
            date_iso: Some(format_iso(instant)),
        }
    }
}

/// Recover the time axis of a row: JULD, then calendar date, then cycle number
pub fn reconstruct(row: &RawRow) -> TimeAxis {
    if let Some(julian_day) = resolve_number(row, LogicalField::JulianDay) {
        if let Some(instant) = julian_day_to_instant(julian_day) {
            return TimeAxis {
                time_value: Some(julian_day),
                date_iso: Some(format_iso(instant)),
            };
        }
    }

    if let Some(instant) =
        resolve(row, LogicalField::CalendarDate).and_then(parse_calendar_digits)
    {
        return TimeAxis::from_instant(instant);
    }

    if let Some(cycle) = resolve(row, LogicalField::CycleIndex).and_then(parse_number) {
        return TimeAxis {
            time_value: Some(cycle),
            date_iso: None,
        };
    }

    TimeAxis::default()
}

/// Instant `julian_day` days after the 1950 epoch, truncated to whole milliseconds
pub fn julian_day_to_instant(julian_day: f64) -> Option<DateTime<Utc>> {
    let instant_ms = (EPOCH_1950_UNIX_MS as f64 + julian_day * MS_PER_DAY).trunc();
    if !instant_ms.is_finite() || instant_ms.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(instant_ms as i64)
}

/// Fractional days between the 1950 epoch and `instant`
pub fn instant_to_julian_day(instant: DateTime<Utc>) -> f64 {
    (instant.timestamp_millis() - EPOCH_1950_UNIX_MS) as f64 / MS_PER_DAY
}

/// Parse a loosely formatted date by its digits alone.
///
/// All non-digit characters are discarded; the remainder must hold at least
/// `YYYYMMDD`, optionally followed by `HH`, `MM` and `SS`. Components that
/// are missing default to zero; components out of calendar range reject the
/// value.
pub fn parse_calendar_digits(value: &str) -> Option<DateTime<Utc>> {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < MIN_DATE_DIGITS {
        return None;
    }

    let component = |start: usize, end: usize| -> Option<u32> {
        let end = end.min(digits.len());
        if start >= end {
            return Some(0);
        }
        digits[start..end].parse().ok()
    };

    let year = digits[0..4].parse::<i32>().ok()?;
    let month = component(4, 6)?;
    let day = component(6, 8)?;
    let hour = component(8, 10)?;
    let minute = component(10, 12)?;
    let second = component(12, 14)?;

    NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_opt(hour, minute, second)
        .map(|naive| naive.and_utc())
}

fn format_iso(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
