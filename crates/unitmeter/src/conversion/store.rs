//! Conversion factor stores
//!
//! Sources of `(from_unit, to_unit, rate)` rows used to populate a
//! [`ConversionRegistry`](super::ConversionRegistry) at startup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use unitmeter_common::StoreError;

/// One conversion factor row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionFactor {
    /// Unit the usage was reported in
    pub from_unit: String,
    /// Unit the usage is billed in
    pub to_unit: String,
    /// Multiplier applied to quantities in `from_unit`
    pub conversion_rate: f64,
}

impl ConversionFactor {
    pub fn new(from_unit: impl Into<String>, to_unit: impl Into<String>, rate: f64) -> Self {
        Self {
            from_unit: from_unit.into(),
            to_unit: to_unit.into(),
            conversion_rate: rate,
        }
    }
}

/// Trait for conversion factor backends
#[async_trait]
pub trait ConversionFactorStore: Send + Sync {
    /// Enumerate every stored factor
    async fn load_factors(&self) -> Result<Vec<ConversionFactor>, StoreError>;
}

/// Fixed set of factors held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryFactorStore {
    factors: Vec<ConversionFactor>,
}

impl InMemoryFactorStore {
    pub fn new(factors: Vec<ConversionFactor>) -> Self {
        Self { factors }
    }

    /// Add a row
    pub fn with_factor(mut self, from_unit: &str, to_unit: &str, rate: f64) -> Self {
        self.factors.push(ConversionFactor::new(from_unit, to_unit, rate));
        self
    }
}

#[async_trait]
impl ConversionFactorStore for InMemoryFactorStore {
    async fn load_factors(&self) -> Result<Vec<ConversionFactor>, StoreError> {
        Ok(self.factors.clone())
    }
}

/// Factors read from a JSON array of rows
///
/// ```json
/// [{ "from_unit": "KB", "to_unit": "MB", "conversion_rate": 0.0009765625 }]
/// ```
///
/// A file that is not a JSON array is reported as a malformed row 0.
#[derive(Debug, Clone)]
pub struct JsonFileFactorStore {
    path: PathBuf,
}

impl JsonFileFactorStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConversionFactorStore for JsonFileFactorStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load_factors(&self) -> Result<Vec<ConversionFactor>, StoreError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {}", self.path.display(), e)))?;

        let rows: Vec<serde_json::Value> =
            serde_json::from_str(&raw).map_err(|e| StoreError::MalformedRow {
                row: 0,
                reason: format!("{} is not a JSON array: {}", self.path.display(), e),
            })?;

        let factors = rows
            .into_iter()
            .enumerate()
            .map(|(row, value)| {
                serde_json::from_value::<ConversionFactor>(value).map_err(|e| {
                    StoreError::MalformedRow {
                        row,
                        reason: e.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = factors.len(), "Read conversion factors");
        Ok(factors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn json_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = InMemoryFactorStore::default()
            .with_factor("KB", "MB", 0.0009765625)
            .with_factor("HOURS", "MINUTES", 60.0);
        let factors = store.load_factors().await.unwrap();
        assert_eq!(factors.len(), 2);
        assert_eq!(factors[1], ConversionFactor::new("HOURS", "MINUTES", 60.0));
    }

    #[tokio::test]
    async fn test_json_file_store() {
        let file = json_file(r#"[{"from_unit":"kb","to_unit":"mb","conversion_rate":0.0009765625}]"#);
        let factors = JsonFileFactorStore::new(file.path()).load_factors().await.unwrap();
        assert_eq!(factors, vec![ConversionFactor::new("kb", "mb", 0.0009765625)]);
    }

    #[tokio::test]
    async fn test_json_file_store_missing_file() {
        let store = JsonFileFactorStore::new("/nonexistent/unitmeter/factors.json");
        assert!(matches!(store.load_factors().await, Err(StoreError::Io(_))));
    }

    #[tokio::test]
    async fn test_json_file_store_malformed_row() {
        let file = json_file(
            r#"[{"from_unit":"A","to_unit":"B","conversion_rate":2.0},{"from_unit":"C"}]"#,
        );
        let result = JsonFileFactorStore::new(file.path()).load_factors().await;
        assert!(matches!(result, Err(StoreError::MalformedRow { row: 1, .. })));
    }

    #[tokio::test]
    async fn test_json_file_store_not_an_array() {
        for contents in ["{not json", r#"{"from_unit":"A","to_unit":"B","conversion_rate":2.0}"#] {
            let file = json_file(contents);
            let result = JsonFileFactorStore::new(file.path()).load_factors().await;
            match result {
                Err(StoreError::MalformedRow { row, reason }) => {
                    assert_eq!(row, 0);
                    assert!(reason.contains("not a JSON array"), "{reason}");
                }
                other => panic!("expected MalformedRow for {contents:?}, got {other:?}"),
            }
        }
    }
}
