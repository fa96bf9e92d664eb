use crate::domain::model::Metadata;
use crate::domain::ports::{ProgressSink, RandomSource};
use crate::utils::error::{PipelineError, Result};
use std::time::Duration;

/// Draws strictly below this value fail the item.
pub const FAILURE_THRESHOLD: f64 = 0.2;

pub struct MetadataProcessor<R: RandomSource> {
    random: R,
    threshold: f64,
    delay: Duration,
}

impl<R: RandomSource> MetadataProcessor<R> {
    pub fn new(random: R, threshold: f64, delay: Duration) -> Self {
        Self {
            random,
            threshold,
            delay,
        }
    }

    /// 處理單筆記錄: 模擬延遲後依隨機值決定成功或失敗
    pub async fn process_item(&self, item: &Metadata) -> Result<String> {
        tokio::time::sleep(self.delay).await;

        let draw = self.random.draw();
        if draw < self.threshold {
            tracing::debug!(
                "Item {} draw {:.3} below threshold {:.2}",
                item.id,
                draw,
                self.threshold
            );
            return Err(PipelineError::processing(format!(
                "Failed to process {}",
                item.value
            )));
        }

        Ok(format!("Processed {}", item.value))
    }

    /// Emits a diagnostic for the failed item and swallows the error so the
    /// stream keeps going. Never re-raises.
    pub fn handle_processing_error(
        &self,
        error: &PipelineError,
        item: &Metadata,
        sink: &dyn ProgressSink,
    ) {
        tracing::warn!("Item {} failed: {}", item.id, error);
        sink.emit(&format!(
            "⚠️ [Error Handler] Item {} failed: {}",
            item.id, error
        ));
    }
}
