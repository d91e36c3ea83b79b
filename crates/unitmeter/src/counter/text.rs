//! Text rendering and parsing of counters
//!
//! | domain   | rendering        |
//! |----------|------------------|
//! | UNIT     | `7 unidade(s)`   |
//! | DATA     | `1536 bytes`     |
//! | TIME     | `01h01m01s`      |
//!
//! Negative time totals carry one leading sign (`-01h01m01s`).
//! These strings are persisted and exchanged, so both directions are fixed.

use super::UnitCounter;
use std::fmt;
use std::str::FromStr;
use tracing::warn;
use unitmeter_common::{CounterDomain, CounterError, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

/// Suffix of rendered discrete counters
pub const DISCRETE_SUFFIX: &str = " unidade(s)";

/// Suffix of rendered data counters
pub const DATA_SUFFIX: &str = " bytes";

/// `HHhMMmSSs` with a single leading sign for negative totals
fn render_clock(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let seconds = seconds.unsigned_abs();
    let (per_hour, per_minute) = (SECONDS_PER_HOUR as u64, SECONDS_PER_MINUTE as u64);
    format!(
        "{sign}{:02}h{:02}m{:02}s",
        seconds / per_hour,
        (seconds % per_hour) / per_minute,
        seconds % per_minute
    )
}

/// Clock text split into sign and fields
struct ClockFields<'a> {
    negative: bool,
    hours: &'a str,
    minutes: &'a str,
    seconds: &'a str,
}

/// Split `[-]HHhMMmSSs` into its fields.
///
/// Hours take two or more characters; minutes and seconds exactly two.
/// Returns `None` when the text does not have that shape.
fn clock_fields(text: &str) -> Option<ClockFields<'_>> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(body) => (true, body),
        None => (false, text),
    };
    let (hours, rest) = body.split_once('h')?;
    let (minutes, rest) = rest.split_once('m')?;
    let seconds = rest.strip_suffix('s')?;
    (hours.len() >= 2 && minutes.len() == 2 && seconds.len() == 2).then_some(ClockFields {
        negative,
        hours,
        minutes,
        seconds,
    })
}

fn parse_magnitude(digits: &str, text: &str) -> Result<i64, CounterError> {
    digits
        .parse::<i64>()
        .map_err(|_| CounterError::InvalidMagnitude(text.to_string()))
}

/// Unsigned decimal clock field
fn clock_digits(field: &str, text: &str) -> Result<i128, CounterError> {
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CounterError::InvalidMagnitude(text.to_string()));
    }
    field
        .parse::<i128>()
        .map_err(|_| CounterError::InvalidMagnitude(text.to_string()))
}

impl ClockFields<'_> {
    fn total_seconds(&self, text: &str) -> Result<i64, CounterError> {
        let total = clock_digits(self.hours, text)?
            .saturating_mul(SECONDS_PER_HOUR as i128)
            .saturating_add(clock_digits(self.minutes, text)? * SECONDS_PER_MINUTE as i128)
            .saturating_add(clock_digits(self.seconds, text)?);
        let total = if self.negative { -total } else { total };
        Ok(i64::try_from(total).unwrap_or(if total < 0 { i64::MIN } else { i64::MAX }))
    }
}

impl UnitCounter {
    /// Render `units` as a counter of `domain` would be rendered
    pub fn format(domain: CounterDomain, units: i64) -> String {
        match domain {
            CounterDomain::Discrete => format!("{units}{DISCRETE_SUFFIX}"),
            CounterDomain::Data => format!("{units}{DATA_SUFFIX}"),
            CounterDomain::Time => render_clock(units),
        }
    }

    /// Parse `text`, falling back to an empty discrete counter on failure
    ///
    /// This is the historical behavior of the persisted format: text in no
    /// recognized shape is not an error, it just counts nothing.
    pub fn parse_lenient(&mut self, text: &str) {
        *self = text.parse().unwrap_or_else(|e: CounterError| {
            warn!(text, error = %e, "Unparseable counter text, using empty unit counter");
            UnitCounter::new(CounterDomain::Discrete)
        });
    }
}

impl fmt::Display for UnitCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&UnitCounter::format(self.domain, self.units))
    }
}

impl FromStr for UnitCounter {
    type Err = CounterError;

    /// Shapes are tried in order: discrete suffix, data suffix, clock.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if let Some(digits) = text.strip_suffix(DISCRETE_SUFFIX) {
            let units = parse_magnitude(digits, text)?;
            return Ok(UnitCounter::with_magnitude(CounterDomain::Discrete, units));
        }
        if let Some(digits) = text.strip_suffix(DATA_SUFFIX) {
            let units = parse_magnitude(digits, text)?;
            return Ok(UnitCounter::with_magnitude(CounterDomain::Data, units));
        }
        let total = clock_fields(text)
            .ok_or_else(|| CounterError::UnrecognizedFormat(text.to_string()))?
            .total_seconds(text)?;
        Ok(UnitCounter::with_magnitude(CounterDomain::Time, total))
    }
}
