use crate::domain::model::{Metadata, RunReport};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Source of the random draw deciding whether an item succeeds or fails.
/// Kept as a port so tests can substitute a deterministic value.
pub trait RandomSource: Send + Sync {
    fn draw(&self) -> f64;
}

/// Destination for the user-visible progress and outcome lines.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, line: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn item_count(&self) -> usize;
    fn concurrent_items(&self) -> usize;
    fn failure_threshold(&self) -> f64;
    fn processing_delay(&self) -> Duration;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Metadata>>;
    async fn process(&self, items: Vec<Metadata>) -> Result<RunReport>;
}
