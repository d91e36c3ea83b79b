//! Usage normalization
//!
//! A usage record arrives as `(unit, value)` text in whatever unit the
//! source reported. Normalizing applies the registered conversion factor
//! into the billing unit and dispatches the result to a counter.

use crate::conversion::ConversionRegistry;
use crate::counter::UnitCounter;
use crate::dispatch::UnitLabel;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};
use unitmeter_common::{LocaleParser, ValueParser};

/// Raw usage record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Aggregation key (account, service, ...)
    pub key: String,
    /// Unit the quantity was reported in
    pub unit: String,
    /// Quantity as reported
    pub value: String,
    /// Unit to bill in, when different from `unit`
    pub target_unit: Option<String>,
}

impl UsageRecord {
    pub fn new(key: impl Into<String>, unit: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            unit: unit.into(),
            value: value.into(),
            target_unit: None,
        }
    }

    /// Bill in `target_unit` instead of the reported unit
    pub fn with_target(mut self, target_unit: impl Into<String>) -> Self {
        self.target_unit = Some(target_unit.into());
        self
    }

    /// Unit the record is billed in
    pub fn billing_unit(&self) -> &str {
        self.target_unit.as_deref().unwrap_or(&self.unit)
    }

    /// Parse `<key> <unit> <value> [<target_unit>]`
    ///
    /// Fields are tab separated when the line holds a tab (so labels such
    /// as `" B"` survive), whitespace separated otherwise.
    pub fn parse_line(line: &str) -> Option<Self> {
        let fields: Vec<&str> = if line.contains('\t') {
            line.trim_end_matches(&['\r', '\n'][..]).split('\t').collect()
        } else {
            line.split_whitespace().collect()
        };

        match fields.as_slice() {
            [key, unit, value] => Some(Self::new(*key, *unit, *value)),
            [key, unit, value, target] => Some(Self::new(*key, *unit, *value).with_target(*target)),
            _ => None,
        }
    }
}

/// Converts usage records into counters
#[derive(Clone)]
pub struct UsageNormalizer {
    registry: Arc<ConversionRegistry>,
    parser: Arc<dyn ValueParser>,
}

impl UsageNormalizer {
    /// Normalizer reading quantities with the en_US parser
    pub fn new(registry: Arc<ConversionRegistry>) -> Self {
        Self::with_parser(registry, Arc::new(LocaleParser))
    }

    pub fn with_parser(registry: Arc<ConversionRegistry>, parser: Arc<dyn ValueParser>) -> Self {
        Self { registry, parser }
    }

    pub fn registry(&self) -> &ConversionRegistry {
        &self.registry
    }

    /// Counter for `record`, in the domain of its billing unit
    #[instrument(skip(self, record), fields(key = %record.key))]
    pub fn normalize(&self, record: &UsageRecord) -> UnitCounter {
        let billing_unit = record.billing_unit();
        let rate = self.registry.lookup(&record.unit, billing_unit);
        let quantity = self.parser.parse_double(Some(&record.value), 0.0) * rate;

        let counter = UnitLabel::resolve(billing_unit).counter_from(quantity);
        debug!(rate, quantity, counter = %counter, "Normalized usage");
        counter
    }
}

impl std::fmt::Debug for UsageNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageNormalizer")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
