//! # Unitmeter
//!
//! Typed unit counters, conversion factors and usage metering for rating
//! pipelines.
//!
//! ## Counters
//!
//! ```text
//! TIME  -> seconds   (add_seconds / add_minutes / add_hours)
//! DATA  -> bytes     (add_bytes / add_kbytes / ... / add_tbytes)
//! UNIT  -> units     (add_units)
//! ```
//!
//! Fractional quantities are rounded half-up at a fixed fractional scale
//! before being scaled to the base unit, so accumulation does not drift.
//!
//! ## Flow
//!
//! 1. [`ConversionRegistry`] is filled once from a [`ConversionFactorStore`]
//! 2. [`UsageNormalizer`] converts each record into its billing unit and
//!    hands it to unit dispatch ([`dispatch::classify`])
//! 3. [`UsageAggregator`] merges the resulting counters per key

pub mod config;
pub mod conversion;
pub mod counter;
pub mod dispatch;
pub mod metering;

pub use config::MeterConfig;
pub use conversion::{
    ConversionFactor, ConversionFactorStore, ConversionRegistry, InMemoryFactorStore,
    JsonFileFactorStore,
};
pub use counter::{DataCounter, TimeCounter, UnitCounter};
pub use dispatch::{classify, classify_with, UnitLabel};
pub use metering::{UsageAggregator, UsageNormalizer, UsageRecord};

pub use unitmeter_common::{CounterDomain, CounterError, MeterError, Result, StoreError};
