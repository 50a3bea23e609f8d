use chrono::{DateTime, NaiveDate};

use crate::server::response::ApiError;

/// Lowercases an identifier (section name, student id) so lookups are
/// case-insensitive.
#[must_use]
pub fn normalize_key(value: &str) -> String {
    value.to_lowercase()
}

/// Parses a calendar day, discarding any time-of-day component. Accepts a
/// plain ISO date or an RFC 3339 datetime.
pub fn parse_day(value: &str) -> Result<NaiveDate, ApiError> {
    if let Ok(day) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(day);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .map_err(|_| ApiError::bad_request("Valid date is required"))
}
