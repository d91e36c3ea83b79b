//! Unitmeter configuration
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. `unitmeter.{toml,json,yaml}` in the working directory, or the file
//!    named by `UNITMETER_CONFIG`
//! 3. `UNITMETER_*` environment variables, `__` separating nested keys
//!    (`UNITMETER_FACTORS__PATH=/etc/unitmeter/factors.json`)

use crate::conversion::{ConversionFactor, ConversionRegistry, JsonFileFactorStore};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;
use unitmeter_common::Result;

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "UNITMETER_CONFIG";

/// Config file looked up when `UNITMETER_CONFIG` is unset
pub const DEFAULT_CONFIG_FILE: &str = "unitmeter";

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "UNITMETER";

/// Unitmeter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterConfig {
    /// Tracing filter directive, used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Conversion factor sources
    pub factors: FactorSettings,
    /// Report rendering
    pub output: OutputSettings,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            factors: FactorSettings::default(),
            output: OutputSettings::default(),
        }
    }
}

impl MeterConfig {
    /// Load configuration from `.env`, the config file and the environment
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let file =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&file)
    }

    /// Load configuration from `file` (optional) and the environment
    pub fn load_from(file: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Registry holding the file store's factors, then the inline ones
    pub async fn build_registry(&self) -> Result<ConversionRegistry> {
        let mut registry = ConversionRegistry::new();
        if let Some(path) = &self.factors.path {
            let loaded = registry.load_from(&JsonFileFactorStore::new(path)).await?;
            info!(path = %path.display(), loaded, "Loaded conversion factors");
        }
        registry.extend(self.factors.inline.iter().cloned());
        Ok(registry)
    }
}

/// Conversion factor sources
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorSettings {
    /// JSON file of factor rows
    pub path: Option<PathBuf>,
    /// Factors declared in the config itself, applied after the file
    pub inline: Vec<ConversionFactor>,
}

/// Report rendering settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Print totals as JSON lines instead of rendered text
    pub json: bool,
}
