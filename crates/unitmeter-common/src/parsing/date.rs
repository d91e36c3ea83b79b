//! Date and date-time parsing for usage record fields
//!
//! Patterns use chrono's strftime syntax. Absent, blank or malformed input
//! yields `None`.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::debug;

/// Default pattern for date fields (`20050201`)
pub const DEFAULT_DATE_PATTERN: &str = "%Y%m%d";

/// Default pattern for date-time fields (`20050201133000`)
pub const DEFAULT_DATETIME_PATTERN: &str = "%Y%m%d%H%M%S";

/// Parse a date with the given pattern
pub fn parse_date(text: Option<&str>, pattern: &str) -> Option<NaiveDate> {
    let text = text.map(str::trim).filter(|t| !t.is_empty())?;
    NaiveDate::parse_from_str(text, pattern)
        .map_err(|e| debug!(value = text, pattern, error = %e, "Unparseable date"))
        .ok()
}

/// Parse a date and shift it by `adjustment_ms` milliseconds
pub fn parse_date_adjusted(
    text: Option<&str>,
    adjustment_ms: i64,
    pattern: &str,
) -> Option<NaiveDateTime> {
    let date = parse_date(text, pattern)?;
    date.and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::milliseconds(adjustment_ms))
}

/// Parse a date-time with the given pattern
pub fn parse_datetime(text: Option<&str>, pattern: &str) -> Option<NaiveDateTime> {
    let text = text.map(str::trim).filter(|t| !t.is_empty())?;
    NaiveDateTime::parse_from_str(text, pattern)
        .map_err(|e| debug!(value = text, pattern, error = %e, "Unparseable date-time"))
        .ok()
}
