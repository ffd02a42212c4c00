//! Last-watered timestamp parsing
//!
//! The plant store hands over whatever text it holds. Records written by this
//! service use RFC 3339, but older rows may carry naive ISO-8601 values
//! (`2024-05-01T08:30:00.123456`) or SQLite's `CURRENT_TIMESTAMP` form
//! (`2024-05-01 08:30:00`). Naive values are read as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a stored last-watered value. Returns `None` for absent, blank or
/// unrecognised text.
pub fn parse_last_watered(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Fractional hours between `last_watered` and `now`, never negative.
///
/// Unparseable input counts as "watered just now" (zero hours).
pub fn hours_since(last_watered: Option<&str>, now: DateTime<Utc>) -> f64 {
    match parse_last_watered(last_watered) {
        Some(watered_at) => {
            let elapsed = now.signed_duration_since(watered_at);
            let seconds = elapsed.num_milliseconds() as f64 / 1000.0;
            (seconds / 3600.0).max(0.0)
        }
        None => 0.0,
    }
}
