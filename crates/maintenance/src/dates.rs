//! Lenient date handling for form and API values.
//!
//! Every parser here returns `None` instead of failing: an unreadable date is
//! treated as absent. Offsets are normalised to UTC before the date part is
//! taken.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Parse a date-time from any of the shapes the UI and API produce.
///
/// Date-only input resolves to midnight.
pub fn parse_loose_datetime(input: &str) -> Option<NaiveDateTime> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    tracing::debug!(value = s, "Unparseable date treated as absent");
    None
}

/// Parse the calendar date out of a date or date-time string.
pub fn parse_loose_date(input: &str) -> Option<NaiveDate> {
    parse_loose_datetime(input).map(|dt| dt.date())
}

/// `YYYY-MM-DDTHH:MM:SS.mmmZ`, or `None` when unparseable.
pub fn format_iso_datetime(input: &str) -> Option<String> {
    parse_loose_datetime(input).map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
}

/// `YYYY-MM-DD`, or `None` when unparseable.
pub fn format_iso_date(input: &str) -> Option<String> {
    parse_loose_date(input).map(|d| d.format("%Y-%m-%d").to_string())
}

/// True when `input` is a date on or after `today`. Unparseable input is never upcoming.
pub fn is_upcoming(input: &str, today: NaiveDate) -> bool {
    parse_loose_date(input).is_some_and(|date| date >= today)
}
