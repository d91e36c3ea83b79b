//! Conversion factor registry
//!
//! Maps a usage record's reporting unit to its billing unit by a scalar
//! rate. Unit labels are free-form and compared case-insensitively. A pair
//! with no registered factor, or a unit converted to itself, has rate 1.0.
//!
//! The registry is filled once (`&mut self`) and then shared read-only,
//! typically behind an `Arc`, so lookups take no locks.

use super::store::{ConversionFactor, ConversionFactorStore};
use std::collections::HashMap;
use tracing::{debug, info, instrument};
use unitmeter_common::StoreError;

/// Rate applied when no factor is registered
pub const IDENTITY_RATE: f64 = 1.0;

/// Lookup table of conversion factors
#[derive(Debug, Clone, Default)]
pub struct ConversionRegistry {
    /// from unit -> to unit -> rate, labels uppercased
    table: HashMap<String, HashMap<String, f64>>,
}

impl ConversionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from every factor in `store`
    ///
    /// A store that fails to enumerate fails the whole initialization.
    #[instrument(skip(store))]
    pub async fn initialize_from<S>(store: &S) -> Result<Self, StoreError>
    where
        S: ConversionFactorStore + ?Sized,
    {
        let mut registry = Self::new();
        registry.load_from(store).await?;
        info!(pairs = registry.len(), "Conversion registry initialized");
        Ok(registry)
    }

    /// Register every factor in `store` on top of the current table
    pub async fn load_from<S>(&mut self, store: &S) -> Result<usize, StoreError>
    where
        S: ConversionFactorStore + ?Sized,
    {
        let factors = store.load_factors().await?;
        let count = factors.len();
        self.extend(factors);
        Ok(count)
    }

    /// Register a factor, replacing any previous one for the same pair
    pub fn register(&mut self, from_unit: &str, to_unit: &str, rate: f64) {
        let previous = self
            .table
            .entry(from_unit.to_uppercase())
            .or_default()
            .insert(to_unit.to_uppercase(), rate);

        if let Some(previous) = previous {
            debug!(from_unit, to_unit, previous, rate, "Replaced conversion factor");
        }
    }

    /// Rate to multiply `from_unit` quantities by to express them in `to_unit`
    pub fn lookup(&self, from_unit: &str, to_unit: &str) -> f64 {
        if from_unit.to_uppercase() == to_unit.to_uppercase() {
            return IDENTITY_RATE;
        }
        self.get(from_unit, to_unit).unwrap_or(IDENTITY_RATE)
    }

    /// Registered rate for the pair, if any
    fn get(&self, from_unit: &str, to_unit: &str) -> Option<f64> {
        self.table
            .get(&from_unit.to_uppercase())?
            .get(&to_unit.to_uppercase())
            .copied()
    }

    /// True when a factor is registered for the pair
    pub fn contains(&self, from_unit: &str, to_unit: &str) -> bool {
        self.get(from_unit, to_unit).is_some()
    }

    /// Express `value` given in `from_unit` in `to_unit`
    pub fn convert(&self, value: f64, from_unit: &str, to_unit: &str) -> f64 {
        value * self.lookup(from_unit, to_unit)
    }

    /// Number of registered pairs
    pub fn len(&self) -> usize {
        self.table.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.table.values().all(HashMap::is_empty)
    }

    /// Registered factors, labels uppercased, in no particular order
    pub fn factors(&self) -> impl Iterator<Item = ConversionFactor> + '_ {
        self.table.iter().flat_map(|(from, targets)| {
            targets
                .iter()
                .map(move |(to, rate)| ConversionFactor::new(from.as_str(), to.as_str(), *rate))
        })
    }
}

impl Extend<ConversionFactor> for ConversionRegistry {
    fn extend<I: IntoIterator<Item = ConversionFactor>>(&mut self, factors: I) {
        for factor in factors {
            self.register(&factor.from_unit, &factor.to_unit, factor.conversion_rate);
        }
    }
}

impl FromIterator<ConversionFactor> for ConversionRegistry {
    fn from_iter<I: IntoIterator<Item = ConversionFactor>>(factors: I) -> Self {
        let mut registry = Self::new();
        registry.extend(factors);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::store::InMemoryFactorStore;
    use async_trait::async_trait;

    #[test]
    fn test_identity_on_empty_registry() {
        let registry = ConversionRegistry::new();
        assert_eq!(registry.lookup("KB", "KB"), 1.0);
        assert_eq!(registry.lookup("KB", "kb"), 1.0);
        assert_eq!(registry.lookup("KB", "MB"), 1.0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registered_rate() {
        let mut registry = ConversionRegistry::new();
        registry.register("KB", "MB", 0.0009765625);
        assert_eq!(registry.lookup("KB", "MB"), 0.0009765625);
        assert_eq!(registry.lookup("kb", "Mb"), 0.0009765625);
        // Direction matters
        assert_eq!(registry.lookup("MB", "KB"), 1.0);
        assert!(registry.contains("kb", "mb"));
        assert!(!registry.contains("MB", "KB"));
    }

    #[test]
    fn test_same_unit_ignores_registered_rate() {
        let mut registry = ConversionRegistry::new();
        registry.register("min", "MIN", 60.0);
        assert_eq!(registry.lookup("MIN", "min"), 1.0);
    }

    #[test]
    fn test_register_overwrites_pair() {
        let mut registry = ConversionRegistry::new();
        registry.register("HOURS", "MINUTES", 30.0);
        registry.register("hours", "minutes", 60.0);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("Hours", "Minutes"), 60.0);
    }

    #[test]
    fn test_convert_and_listing() {
        let registry: ConversionRegistry = vec![
            ConversionFactor::new("pulse", "seconds", 6.0),
            ConversionFactor::new("pulse", "minutes", 0.1),
        ]
        .into_iter()
        .collect();
        assert_eq!(registry.convert(10.0, "PULSE", "SECONDS"), 60.0);
        assert_eq!(registry.convert(10.0, "PULSE", "EVENT"), 10.0);

        let mut factors: Vec<_> = registry.factors().collect();
        factors.sort_by(|a, b| a.to_unit.cmp(&b.to_unit));
        assert_eq!(
            factors,
            vec![
                ConversionFactor::new("PULSE", "MINUTES", 0.1),
                ConversionFactor::new("PULSE", "SECONDS", 6.0),
            ]
        );
    }

    #[tokio::test]
    async fn test_initialize_from_store() {
        let store = InMemoryFactorStore::default()
            .with_factor("KB", "MB", 0.0009765625)
            .with_factor("HOURS", "MINUTES", 60.0);
        let registry = ConversionRegistry::initialize_from(&store).await.unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.lookup("hours", "minutes"), 60.0);
    }

    struct BrokenStore;

    #[async_trait]
    impl ConversionFactorStore for BrokenStore {
        async fn load_factors(&self) -> Result<Vec<ConversionFactor>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_initialize_surfaces_store_failure() {
        let result = ConversionRegistry::initialize_from(&BrokenStore).await;
        assert_eq!(
            result.unwrap_err(),
            StoreError::Unavailable("connection refused".into())
        );
    }
}
