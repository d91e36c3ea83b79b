//! Value parsing for raw usage record fields
//!
//! Raw fields arrive as free text. Parsing never fails: absent, blank or
//! malformed input falls back to the caller's default.
//!
//! - [`ValueParser`]: the parsing seam consumed by unit dispatch
//! - [`LocaleParser`]: en_US implementation (`1,234.5`)

pub mod date;
pub mod number;

pub use date::{
    parse_date, parse_date_adjusted, parse_datetime, DEFAULT_DATE_PATTERN,
    DEFAULT_DATETIME_PATTERN,
};
pub use number::{format_double, scan_number};

use tracing::debug;

/// Default-on-failure parsing of numeric and boolean fields
pub trait ValueParser: Send + Sync {
    /// Parse a real number, or return `default`
    fn parse_double(&self, text: Option<&str>, default: f64) -> f64;

    /// Parse an integer (fractions truncate toward zero), or return `default`
    fn parse_int(&self, text: Option<&str>, default: i64) -> i64;

    /// Parse a yes/no flag; anything unrecognized is `false`
    fn parse_boolean(&self, text: Option<&str>) -> bool;
}

/// Values accepted as `true` by [`LocaleParser::parse_boolean`]
const TRUE_VALUES: [&str; 6] = ["Y", "S", "T", "yes", "sim", "true"];

/// en_US value parser
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleParser;

impl LocaleParser {
    pub fn new() -> Self {
        Self
    }

    /// Trimmed text, or an empty string when absent
    pub fn get_string(text: Option<&str>) -> &str {
        text.map(str::trim).unwrap_or_default()
    }

    fn scan(text: Option<&str>) -> Option<f64> {
        let trimmed = text.map(str::trim).filter(|t| !t.is_empty())?;
        let value = scan_number(trimmed);
        if value.is_none() {
            debug!(value = trimmed, "Unparseable number, using default");
        }
        value
    }
}

impl ValueParser for LocaleParser {
    fn parse_double(&self, text: Option<&str>, default: f64) -> f64 {
        Self::scan(text).unwrap_or(default)
    }

    fn parse_int(&self, text: Option<&str>, default: i64) -> i64 {
        Self::scan(text).map(|v| v as i64).unwrap_or(default)
    }

    fn parse_boolean(&self, text: Option<&str>) -> bool {
        text.map(str::trim)
            .is_some_and(|t| TRUE_VALUES.iter().any(|v| v.eq_ignore_ascii_case(t)))
    }
}
