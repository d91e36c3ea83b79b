//! Unit dispatch
//!
//! Turns an external unit label plus a raw quantity into a counter of the
//! right domain. Labels match case-insensitively and exactly:
//!
//! | label                          | counter | quantity read as   |
//! |--------------------------------|---------|--------------------|
//! | MINUTES                        | TIME    | minutes (real)     |
//! | SECONDS, TIME                  | TIME    | seconds (integer)  |
//! | KB, KBYTES / MB / GB / TB      | DATA    | that unit (real)   |
//! | `" B"`                         | DATA    | bytes (integer)    |
//! | DOWNLOAD, EVENT, EVENTO, UNIT  | UNIT    | units (integer)    |
//! | anything else                  | TIME    | minutes (real)     |
//!
//! The last row keeps unknown labels billable as minutes, which is what
//! existing rating data expects.

use crate::counter::UnitCounter;
use tracing::debug;
use unitmeter_common::{CounterDomain, CounterError, LocaleParser, ValueParser};

/// Recognized unit labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitLabel {
    Minutes,
    Seconds,
    KBytes,
    MBytes,
    GBytes,
    TBytes,
    Bytes,
    Units,
    /// Unrecognized label, counted as minutes
    Fallback,
}

impl UnitLabel {
    /// Resolve a free-form label
    pub fn resolve(label: &str) -> Self {
        const TABLE: &[(&str, UnitLabel)] = &[
            ("MINUTES", UnitLabel::Minutes),
            ("SECONDS", UnitLabel::Seconds),
            ("TIME", UnitLabel::Seconds),
            ("KB", UnitLabel::KBytes),
            ("KBYTES", UnitLabel::KBytes),
            ("MB", UnitLabel::MBytes),
            ("GB", UnitLabel::GBytes),
            ("TB", UnitLabel::TBytes),
            (" B", UnitLabel::Bytes),
            ("DOWNLOAD", UnitLabel::Units),
            ("EVENT", UnitLabel::Units),
            ("EVENTO", UnitLabel::Units),
            ("UNIT", UnitLabel::Units),
        ];

        TABLE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(label))
            .map(|(_, unit)| *unit)
            .unwrap_or_else(|| {
                debug!(label, "Unrecognized unit label, counting as minutes");
                UnitLabel::Fallback
            })
    }

    /// Domain of counters built for this label
    pub fn domain(&self) -> CounterDomain {
        match self {
            UnitLabel::Minutes | UnitLabel::Seconds | UnitLabel::Fallback => CounterDomain::Time,
            UnitLabel::KBytes
            | UnitLabel::MBytes
            | UnitLabel::GBytes
            | UnitLabel::TBytes
            | UnitLabel::Bytes => CounterDomain::Data,
            UnitLabel::Units => CounterDomain::Discrete,
        }
    }

    /// True when quantities for this label are read as integers
    pub fn is_integral(&self) -> bool {
        matches!(self, UnitLabel::Seconds | UnitLabel::Bytes | UnitLabel::Units)
    }

    /// Add `quantity`, expressed in this label's unit, to `counter`
    ///
    /// Goes through the counter's own scaled adders. Integral labels
    /// truncate toward zero. Fails when `counter` is not in this label's
    /// domain.
    pub fn add_to(&self, counter: &mut UnitCounter, quantity: f64) -> Result<(), CounterError> {
        match self {
            UnitLabel::Minutes | UnitLabel::Fallback => counter.add_minutes(quantity),
            UnitLabel::KBytes => counter.add_kbytes(quantity),
            UnitLabel::MBytes => counter.add_mbytes(quantity),
            UnitLabel::GBytes => counter.add_gbytes(quantity),
            UnitLabel::TBytes => counter.add_tbytes(quantity),
            UnitLabel::Seconds | UnitLabel::Bytes | UnitLabel::Units => {
                self.add_whole(counter, quantity as i64)
            }
        }
    }

    fn add_whole(&self, counter: &mut UnitCounter, units: i64) -> Result<(), CounterError> {
        match self {
            UnitLabel::Seconds => counter.add_seconds(units),
            UnitLabel::Bytes => counter.add_bytes(units),
            UnitLabel::Units if counter.domain() != CounterDomain::Discrete => {
                Err(CounterError::DomainMismatch {
                    operation: "add discrete units",
                    expected: CounterDomain::Discrete,
                    actual: counter.domain(),
                })
            }
            UnitLabel::Units => {
                counter.add_units(units);
                Ok(())
            }
            _ => self.add_to(counter, units as f64),
        }
    }

    /// Fresh counter in this label's domain holding `quantity`
    pub fn counter_from(&self, quantity: f64) -> UnitCounter {
        let mut counter = UnitCounter::new(self.domain());
        let added = self.add_to(&mut counter, quantity);
        debug_assert!(added.is_ok(), "{self:?} rejected its own domain");
        counter
    }

    /// Counter holding `raw` read through `parser`
    pub fn counter_for<P>(&self, parser: &P, raw: &str) -> UnitCounter
    where
        P: ValueParser + ?Sized,
    {
        if !self.is_integral() {
            return self.counter_from(parser.parse_double(Some(raw), 0.0));
        }
        let mut counter = UnitCounter::new(self.domain());
        let added = self.add_whole(&mut counter, parser.parse_int(Some(raw), 0));
        debug_assert!(added.is_ok(), "{self:?} rejected its own domain");
        counter
    }
}

/// Classify `raw` under `label` using the en_US parser
///
/// Returns `None` when either input is absent.
pub fn classify(label: Option<&str>, raw: Option<&str>) -> Option<UnitCounter> {
    classify_with(&LocaleParser, label, raw)
}

/// Classify `raw` under `label`, reading the quantity with `parser`
pub fn classify_with<P>(parser: &P, label: Option<&str>, raw: Option<&str>) -> Option<UnitCounter>
where
    P: ValueParser + ?Sized,
{
    let (label, raw) = (label?, raw?);
    Some(UnitLabel::resolve(label).counter_for(parser, raw.trim()))
}
