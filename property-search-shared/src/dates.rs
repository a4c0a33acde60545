//! Calendar date parsing for stay ranges.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Parse a stay date supplied by a client into a calendar day.
///
/// Accepts either a plain `YYYY-MM-DD` date or an RFC 3339 timestamp. A
/// timestamp is reduced to its UTC calendar day; time of day is discarded.
///
/// Returns `None` when the input matches neither form, or when the year
/// falls outside `0000..=9999`.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    let date = match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => DateTime::parse_from_rfc3339(raw)
            .ok()?
            .with_timezone(&Utc)
            .date_naive(),
    };

    (0..=9999).contains(&date.year()).then_some(date)
}
