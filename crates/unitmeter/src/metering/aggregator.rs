//! Usage aggregation with DashMap
//!
//! Accumulates normalized counters per key. The first counter recorded for
//! a key fixes its domain; later counters must match it.

use super::normalizer::{UsageNormalizer, UsageRecord};
use crate::counter::UnitCounter;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};
use unitmeter_common::CounterError;

/// Aggregator metrics
#[derive(Debug, Default)]
pub struct AggregatorMetrics {
    pub records_accepted: AtomicU64,
    pub records_rejected: AtomicU64,
}

/// Per-key usage totals
#[derive(Debug, Default)]
pub struct UsageAggregator {
    totals: DashMap<String, UnitCounter>,
    metrics: AggregatorMetrics,
}

impl UsageAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `counter` into the total for `key`
    ///
    /// A counter whose domain differs from the stored total is rejected and
    /// the total is left unchanged.
    pub fn record(&self, key: &str, counter: &UnitCounter) -> Result<(), CounterError> {
        let result = match self.totals.entry(key.to_string()) {
            Entry::Occupied(mut total) => total.get_mut().add_counter(counter),
            Entry::Vacant(slot) => {
                debug!(key, domain = %counter.domain(), "New usage total");
                slot.insert(counter.clone());
                Ok(())
            }
        };

        match &result {
            Ok(()) => {
                self.metrics.records_accepted.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                self.metrics.records_rejected.fetch_add(1, Ordering::Relaxed);
                warn!(key, error = %e, "Rejected usage");
            }
        }
        result
    }

    /// Normalize `record` and merge it under the record's key
    pub fn ingest(
        &self,
        normalizer: &UsageNormalizer,
        record: &UsageRecord,
    ) -> Result<UnitCounter, CounterError> {
        let counter = normalizer.normalize(record);
        self.record(&record.key, &counter)?;
        Ok(counter)
    }

    /// Current total for `key`
    pub fn get(&self, key: &str) -> Option<UnitCounter> {
        self.totals.get(key).map(|total| total.value().clone())
    }

    /// Snapshot of every total, ordered by key
    pub fn totals(&self) -> Vec<(String, UnitCounter)> {
        let mut totals: Vec<_> = self
            .totals
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        totals.sort_by(|a, b| a.0.cmp(&b.0));
        totals
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Drop every total
    pub fn clear(&self) {
        self.totals.clear();
    }

    pub fn metrics(&self) -> &AggregatorMetrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::ConversionRegistry;
    use std::sync::Arc;
    use unitmeter_common::CounterDomain;

    #[test]
    fn test_record_merges_same_domain() {
        let aggregator = UsageAggregator::new();
        aggregator
            .record("acct", &UnitCounter::with_magnitude(CounterDomain::Discrete, 3))
            .unwrap();
        aggregator
            .record("acct", &UnitCounter::with_magnitude(CounterDomain::Discrete, 4))
            .unwrap();
        assert_eq!(
            aggregator.get("acct"),
            Some(UnitCounter::with_magnitude(CounterDomain::Discrete, 7))
        );
        assert_eq!(aggregator.metrics().records_accepted.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_record_rejects_other_domain() {
        let aggregator = UsageAggregator::new();
        aggregator
            .record("acct", &UnitCounter::with_magnitude(CounterDomain::Discrete, 3))
            .unwrap();
        let err = aggregator
            .record("acct", &UnitCounter::with_magnitude(CounterDomain::Time, 60))
            .unwrap_err();
        assert!(matches!(err, CounterError::IncompatibleCounters { .. }));
        assert_eq!(aggregator.get("acct").unwrap().units(), 3);
        assert_eq!(aggregator.metrics().records_rejected.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_ingest_and_totals() {
        let normalizer = UsageNormalizer::new(Arc::new(ConversionRegistry::new()));
        let aggregator = UsageAggregator::new();
        aggregator
            .ingest(&normalizer, &UsageRecord::new("b", "KB", "1"))
            .unwrap();
        aggregator
            .ingest(&normalizer, &UsageRecord::new("a", "MINUTES", "1.5"))
            .unwrap();
        aggregator
            .ingest(&normalizer, &UsageRecord::new("b", "KB", "0.5"))
            .unwrap();

        let totals = aggregator.totals();
        assert_eq!(
            totals,
            vec![
                ("a".to_string(), UnitCounter::with_magnitude(CounterDomain::Time, 90)),
                ("b".to_string(), UnitCounter::with_magnitude(CounterDomain::Data, 1536)),
            ]
        );

        aggregator.clear();
        assert!(aggregator.is_empty());
    }

    #[test]
    fn test_concurrent_records() {
        let aggregator = Arc::new(UsageAggregator::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let aggregator = aggregator.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        aggregator
                            .record("shared", &UnitCounter::with_magnitude(CounterDomain::Data, 2))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(aggregator.get("shared").unwrap().bytes(), 1600);
        assert_eq!(aggregator.len(), 1);
    }
}
