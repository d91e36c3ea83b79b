//! Metering module
//!
//! Turns raw usage records into per-key totals:
//! - UsageNormalizer: applies conversion factors and unit dispatch
//! - UsageAggregator: accumulates counters by key

pub mod aggregator;
pub mod normalizer;

pub use aggregator::{AggregatorMetrics, UsageAggregator};
pub use normalizer::{UsageNormalizer, UsageRecord};
