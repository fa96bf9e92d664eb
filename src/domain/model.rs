use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub id: u32,
    pub value: String,
}

impl Metadata {
    pub fn new(id: u32, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
        }
    }
}

/// 建立靜態的示例資料清單: id 0..count, value = "Item {id}"
pub fn metadata_list(count: usize) -> Vec<Metadata> {
    (0..count as u32)
        .map(|id| Metadata::new(id, format!("Item {}", id)))
        .collect()
}

/// A per-item failure that was caught and recovered by the error handler.
#[derive(Debug, Clone, Serialize)]
pub struct ItemFailure {
    pub item: Metadata,
    pub reason: String,
}

/// Outcome of one pipeline run. `processed` and `failures` are in stream
/// completion order, which is unspecified when running concurrently.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub processed: Vec<String>,
    pub failures: Vec<ItemFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    pub fn total(&self) -> usize {
        self.processed.len() + self.failures.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn elapsed_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }

    /// One-line JSON rendition for the `--summary` log output.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
