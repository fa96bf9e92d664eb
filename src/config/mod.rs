pub mod cli;
pub mod toml_config;

use crate::core::processor::FAILURE_THRESHOLD;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_range, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "meta-pipeline")]
#[command(about = "A small demo pipeline for processing metadata records")]
pub struct CliConfig {
    #[arg(long, default_value = "10")]
    pub item_count: usize,

    #[arg(long, default_value = "4")]
    pub concurrent_items: usize,

    /// Draws below this value fail the item
    #[arg(long, default_value_t = FAILURE_THRESHOLD)]
    pub failure_threshold: f64,

    /// Simulated per-item processing delay in milliseconds
    #[arg(long, default_value = "100")]
    pub delay_ms: u64,

    /// Load pipeline settings from a TOML file instead of the flags above
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Log the run report as one JSON line")]
    pub summary: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn item_count(&self) -> usize {
        self.item_count
    }

    fn concurrent_items(&self) -> usize {
        self.concurrent_items
    }

    fn failure_threshold(&self) -> f64 {
        self.failure_threshold
    }

    fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_positive_number("item_count", self.item_count, 1)?;
        validate_positive_number("concurrent_items", self.concurrent_items, 1)?;
        validate_range("failure_threshold", self.failure_threshold, 0.0, 1.0)?;
        validate_range("delay_ms", self.delay_ms, 0, 60_000)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            item_count: 10,
            concurrent_items: 4,
            failure_threshold: FAILURE_THRESHOLD,
            delay_ms: 100,
            config: None,
            summary: false,
            verbose: false,
            log_json: false,
            monitor: false,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let mut config = base_config();
        config.concurrent_items = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_threshold_out_of_range_is_rejected() {
        let mut config = base_config();
        config.failure_threshold = 1.5;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_provider_maps_delay_to_duration() {
        let config = base_config();

        assert_eq!(config.processing_delay(), Duration::from_millis(100));
        assert_eq!(config.item_count(), 10);
    }
}
