use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::DateParseError;

/// Normalizes a stored date representation into a calendar date.
///
/// A strict `YYYY-MM-DD` value is decomposed numerically and constructed
/// directly, never routed through a timestamp parser, so `"2025-10-05"` is
/// October 5th in every environment regardless of its UTC offset. Anything
/// else goes through the generic parsers; a full timestamp contributes the
/// calendar date of its own offset.
pub fn normalize_date(raw: &str) -> Result<NaiveDate, DateParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DateParseError::Empty);
    }

    if let Some((year, month, day)) = split_plain_date(raw) {
        return NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(DateParseError::OutOfRange { year, month, day });
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.date_naive());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(ts.date());
    }

    Err(DateParseError::Unrecognized(raw.to_string()))
}

/// Matches the strict date-only form: three dash-separated all-digit groups
/// with a four-digit year. A trailing time component makes the day group
/// non-numeric and falls through to the generic parsers.
fn split_plain_date(raw: &str) -> Option<(i32, u32, u32)> {
    let mut parts = raw.splitn(3, '-');
    let year = parts.next()?;
    let month = parts.next()?;
    let day = parts.next()?;

    if year.len() != 4 || !(1..=2).contains(&month.len()) || !(1..=2).contains(&day.len()) {
        return None;
    }
    if ![year, month, day]
        .iter()
        .all(|part| part.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    Some((year.parse().ok()?, month.parse().ok()?, day.parse().ok()?))
}
