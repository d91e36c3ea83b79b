//! Unitmeter binary
//!
//! Reads usage lines `<key> <unit> <value> [<target_unit>]` from stdin and
//! prints one total per key once input ends.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use unitmeter::{MeterConfig, UsageAggregator, UsageNormalizer, UsageRecord};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = MeterConfig::load()?;

    // Initialize tracing, RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    info!("Starting unitmeter v{}", unitmeter_common::VERSION);

    let registry = Arc::new(config.build_registry().await?);
    info!(pairs = registry.len(), "Conversion factors ready");

    let normalizer = UsageNormalizer::new(registry);
    let aggregator = UsageAggregator::new();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut line_no = 0usize;
    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(record) = UsageRecord::parse_line(&line) else {
            warn!(line_no, "Skipping malformed usage line");
            continue;
        };
        if let Err(e) = aggregator.ingest(&normalizer, &record) {
            warn!(line_no, key = %record.key, error = %e, "Skipping usage line");
        }
    }

    for (key, total) in aggregator.totals() {
        if config.output.json {
            let row = serde_json::json!({
                "key": key,
                "total": total,
                "rendered": total.to_string(),
            });
            println!("{}", row);
        } else {
            println!("{}\t{}", key, total);
        }
    }

    info!(
        keys = aggregator.len(),
        lines = line_no,
        "Usage aggregated"
    );
    Ok(())
}
