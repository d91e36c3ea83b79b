//! Typed unit counter
//!
//! A [`UnitCounter`] holds a canonical integer magnitude tagged with its
//! [`CounterDomain`]: seconds for time, bytes for data, units for discrete
//! counts. Scaled adders are gated on the domain; reading is not.
//!
//! Callers that know the domain statically can borrow a typed view
//! ([`TimeCounter`], [`DataCounter`]) whose adders cannot fail.

pub mod scale;
mod text;

pub use text::{DATA_SUFFIX, DISCRETE_SUFFIX};

use serde::{Deserialize, Serialize};
use unitmeter_common::{CounterDomain, CounterError};

/// Counter of time, data or discrete units
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitCounter {
    /// Measurement domain
    #[serde(rename = "type")]
    domain: CounterDomain,
    /// Magnitude in the domain's base unit
    units: i64,
}

impl UnitCounter {
    /// Create an empty counter
    pub fn new(domain: CounterDomain) -> Self {
        Self { domain, units: 0 }
    }

    /// Create a counter holding `units` base units
    pub fn with_magnitude(domain: CounterDomain, units: i64) -> Self {
        Self { domain, units }
    }

    /// Create an empty counter from a persisted domain tag
    pub fn from_tag(tag: &str) -> Result<Self, CounterError> {
        Ok(Self::new(tag.parse()?))
    }

    pub fn domain(&self) -> CounterDomain {
        self.domain
    }

    /// Change the domain. Retyping clears the magnitude.
    pub fn set_domain(&mut self, domain: CounterDomain) {
        self.domain = domain;
        self.units = 0;
    }

    /// Change the domain from a persisted tag. Retyping clears the magnitude.
    pub fn set_domain_tag(&mut self, tag: &str) -> Result<(), CounterError> {
        self.set_domain(tag.parse()?);
        Ok(())
    }

    /// True when both counters share a domain, whatever their magnitudes
    pub fn same_domain(&self, other: &UnitCounter) -> bool {
        self.domain == other.domain
    }

    /// Zero the magnitude, keeping the domain
    pub fn reset(&mut self) {
        self.units = 0;
    }

    #[inline]
    fn accumulate(&mut self, delta: i64) {
        self.units = self.units.saturating_add(delta);
    }

    /// Add raw base units, whatever the domain
    pub fn add_units(&mut self, units: i64) {
        self.accumulate(units);
    }

    /// Borrow as a time counter
    pub fn as_time(&mut self) -> Result<TimeCounter<'_>, CounterError> {
        self.require(CounterDomain::Time, "add time units")?;
        Ok(TimeCounter { counter: self })
    }

    /// Borrow as a data counter
    pub fn as_data(&mut self) -> Result<DataCounter<'_>, CounterError> {
        self.require(CounterDomain::Data, "add data units")?;
        Ok(DataCounter { counter: self })
    }

    fn require(&self, expected: CounterDomain, operation: &'static str) -> Result<(), CounterError> {
        if self.domain == expected {
            Ok(())
        } else {
            Err(CounterError::DomainMismatch {
                operation,
                expected,
                actual: self.domain,
            })
        }
    }

    pub fn add_seconds(&mut self, seconds: i64) -> Result<(), CounterError> {
        self.as_time().map(|mut c| c.add_seconds(seconds))
    }

    pub fn add_minutes(&mut self, minutes: f64) -> Result<(), CounterError> {
        self.as_time().map(|mut c| c.add_minutes(minutes))
    }

    pub fn add_hours(&mut self, hours: f64) -> Result<(), CounterError> {
        self.as_time().map(|mut c| c.add_hours(hours))
    }

    pub fn add_bytes(&mut self, bytes: i64) -> Result<(), CounterError> {
        self.as_data().map(|mut c| c.add_bytes(bytes))
    }

    pub fn add_kbytes(&mut self, kbytes: f64) -> Result<(), CounterError> {
        self.as_data().map(|mut c| c.add_kbytes(kbytes))
    }

    pub fn add_mbytes(&mut self, mbytes: f64) -> Result<(), CounterError> {
        self.as_data().map(|mut c| c.add_mbytes(mbytes))
    }

    pub fn add_gbytes(&mut self, gbytes: f64) -> Result<(), CounterError> {
        self.as_data().map(|mut c| c.add_gbytes(gbytes))
    }

    pub fn add_tbytes(&mut self, tbytes: f64) -> Result<(), CounterError> {
        self.as_data().map(|mut c| c.add_tbytes(tbytes))
    }

    /// Merge another counter of the same domain into this one
    ///
    /// No unit conversion happens here; counters of different domains are
    /// rejected and `self` is left untouched.
    pub fn add_counter(&mut self, other: &UnitCounter) -> Result<(), CounterError> {
        if !self.same_domain(other) {
            return Err(CounterError::IncompatibleCounters {
                current: self.domain,
                other: other.domain,
            });
        }
        self.accumulate(other.units);
        Ok(())
    }

    // Readers return the raw magnitude scaled as asked, without a domain check.

    pub fn seconds(&self) -> i64 {
        self.units
    }

    pub fn minutes(&self) -> f64 {
        self.units as f64 / 60.0
    }

    pub fn bytes(&self) -> i64 {
        self.units
    }

    pub fn kbytes(&self) -> f64 {
        self.units as f64 / 1024.0
    }

    pub fn mbytes(&self) -> f64 {
        self.kbytes() / 1024.0
    }

    pub fn gbytes(&self) -> f64 {
        self.mbytes() / 1024.0
    }

    pub fn tbytes(&self) -> f64 {
        self.gbytes() / 1024.0
    }

    pub fn units(&self) -> i64 {
        self.units
    }

    /// Overwrite the magnitude, whatever the domain
    pub fn set_units(&mut self, units: i64) {
        self.units = units;
    }
}

/// Time view of a [`UnitCounter`]
#[derive(Debug)]
pub struct TimeCounter<'a> {
    counter: &'a mut UnitCounter,
}

impl TimeCounter<'_> {
    pub fn add_seconds(&mut self, seconds: i64) {
        self.counter.accumulate(seconds);
    }

    pub fn add_minutes(&mut self, minutes: f64) {
        self.counter.accumulate(scale::minutes_to_seconds(minutes));
    }

    pub fn add_hours(&mut self, hours: f64) {
        self.counter.accumulate(scale::hours_to_seconds(hours));
    }

    pub fn seconds(&self) -> i64 {
        self.counter.units
    }
}

/// Data view of a [`UnitCounter`]
#[derive(Debug)]
pub struct DataCounter<'a> {
    counter: &'a mut UnitCounter,
}

impl DataCounter<'_> {
    pub fn add_bytes(&mut self, bytes: i64) {
        self.counter.accumulate(bytes);
    }

    pub fn add_kbytes(&mut self, kbytes: f64) {
        self.counter.accumulate(scale::kbytes_to_bytes(kbytes));
    }

    pub fn add_mbytes(&mut self, mbytes: f64) {
        self.counter.accumulate(scale::mbytes_to_bytes(mbytes));
    }

    pub fn add_gbytes(&mut self, gbytes: f64) {
        self.counter.accumulate(scale::gbytes_to_bytes(gbytes));
    }

    pub fn add_tbytes(&mut self, tbytes: f64) {
        self.counter.accumulate(scale::tbytes_to_bytes(tbytes));
    }

    pub fn bytes(&self) -> i64 {
        self.counter.units
    }
}
