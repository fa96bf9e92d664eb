use crate::core::processor::MetadataProcessor;
use crate::domain::model::{metadata_list, ItemFailure, Metadata, RunReport};
use crate::domain::ports::{ConfigProvider, Pipeline, ProgressSink, RandomSource};
use crate::utils::error::{PipelineError, Result};
use async_trait::async_trait;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

pub struct MetadataPipeline<R: RandomSource, C: ConfigProvider> {
    processor: MetadataProcessor<R>,
    config: C,
    sink: Arc<dyn ProgressSink>,
}

impl<R: RandomSource, C: ConfigProvider> MetadataPipeline<R, C> {
    pub fn new(random: R, config: C, sink: Arc<dyn ProgressSink>) -> Self {
        let processor = MetadataProcessor::new(
            random,
            config.failure_threshold(),
            config.processing_delay(),
        );
        Self {
            processor,
            config,
            sink,
        }
    }

    fn log_progress(&self, result: &str) {
        self.sink.emit(&format!("🚀 [Progress] {}", result));
    }

    fn on_completed(&self) {
        self.sink.emit("✅ All metadata processed.");
    }
}

#[async_trait]
impl<R: RandomSource, C: ConfigProvider> Pipeline for MetadataPipeline<R, C> {
    async fn extract(&self) -> Result<Vec<Metadata>> {
        let items = metadata_list(self.config.item_count());
        tracing::debug!("Built {} metadata records", items.len());
        Ok(items)
    }

    async fn process(&self, items: Vec<Metadata>) -> Result<RunReport> {
        let width = self.config.concurrent_items();
        if width == 0 {
            return Err(PipelineError::StreamError {
                message: "concurrent_items must be at least 1".to_string(),
            });
        }

        let started_at = Utc::now();
        let mut processed = Vec::new();
        let mut failures = Vec::new();

        let processor = &self.processor;
        let mut outcomes = stream::iter(items)
            .map(move |item| async move {
                let outcome = processor.process_item(&item).await;
                (item, outcome)
            })
            .buffer_unordered(width);

        while let Some((item, outcome)) = outcomes.next().await {
            match outcome {
                Ok(result) => {
                    tracing::info!("Item {} processed", item.id);
                    self.log_progress(&result);
                    processed.push(result);
                }
                Err(error) => {
                    self.processor
                        .handle_processing_error(&error, &item, self.sink.as_ref());
                    failures.push(ItemFailure {
                        item,
                        reason: error.to_string(),
                    });
                }
            }
        }

        self.on_completed();

        Ok(RunReport {
            processed,
            failures,
            started_at,
            finished_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    struct FixedRandom {
        value: f64,
    }

    impl RandomSource for FixedRandom {
        fn draw(&self) -> f64 {
            self.value
        }
    }

    /// Returns the configured draws in order, repeating the last one.
    struct SequenceRandom {
        values: Vec<f64>,
        next: AtomicUsize,
    }

    impl SequenceRandom {
        fn new(values: Vec<f64>) -> Self {
            Self {
                values,
                next: AtomicUsize::new(0),
            }
        }
    }

    impl RandomSource for SequenceRandom {
        fn draw(&self) -> f64 {
            let index = self.next.fetch_add(1, Ordering::SeqCst);
            let index = index.min(self.values.len() - 1);
            self.values[index]
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        lines: Mutex<Vec<String>>,
    }

    impl RecordingSink {
        fn lines(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }
    }

    impl ProgressSink for RecordingSink {
        fn emit(&self, line: &str) {
            self.lines.lock().unwrap().push(line.to_string());
        }
    }

    struct TestConfig {
        item_count: usize,
        concurrent_items: usize,
    }

    impl ConfigProvider for TestConfig {
        fn item_count(&self) -> usize {
            self.item_count
        }

        fn concurrent_items(&self) -> usize {
            self.concurrent_items
        }

        fn failure_threshold(&self) -> f64 {
            0.2
        }

        fn processing_delay(&self) -> Duration {
            Duration::ZERO
        }
    }

    fn pipeline<R: RandomSource>(
        random: R,
        item_count: usize,
        concurrent_items: usize,
        sink: Arc<RecordingSink>,
    ) -> MetadataPipeline<R, TestConfig> {
        let config = TestConfig {
            item_count,
            concurrent_items,
        };
        MetadataPipeline::new(random, config, sink)
    }

    #[tokio::test]
    async fn test_extract_builds_configured_list() {
        let sink = Arc::new(RecordingSink::default());
        let pipeline = pipeline(FixedRandom { value: 0.5 }, 10, 4, sink);

        let items = pipeline.extract().await.unwrap();

        assert_eq!(items.len(), 10);
        assert_eq!(items[0], Metadata::new(0, "Item 0"));
        assert_eq!(items[9], Metadata::new(9, "Item 9"));
    }

    #[tokio::test]
    async fn test_process_all_items_succeed() {
        let sink = Arc::new(RecordingSink::default());
        let pipeline = pipeline(FixedRandom { value: 0.5 }, 10, 4, sink.clone());

        let items = pipeline.extract().await.unwrap();
        let report = pipeline.process(items).await.unwrap();

        assert_eq!(report.processed.len(), 10);
        assert!(report.all_succeeded());

        let lines = sink.lines();
        let progress_count = lines
            .iter()
            .filter(|l| l.starts_with("🚀 [Progress] Processed Item "))
            .count();
        assert_eq!(progress_count, 10);
        assert_eq!(lines.last().unwrap(), "✅ All metadata processed.");
    }

    #[tokio::test]
    async fn test_process_recovers_every_failure() {
        let sink = Arc::new(RecordingSink::default());
        let pipeline = pipeline(FixedRandom { value: 0.0 }, 10, 4, sink.clone());

        let items = pipeline.extract().await.unwrap();
        let report = pipeline.process(items).await.unwrap();

        assert!(report.processed.is_empty());
        assert_eq!(report.failures.len(), 10);
        for failure in &report.failures {
            assert!(failure.reason.contains("Failed to process"));
        }

        // 每筆失敗都經過錯誤處理器, 管線仍然完成
        let lines = sink.lines();
        let handled = lines.iter().filter(|l| l.contains("[Error Handler]")).count();
        assert_eq!(handled, 10);
        assert_eq!(lines.last().unwrap(), "✅ All metadata processed.");
    }

    #[tokio::test]
    async fn test_process_mixed_outcomes_sequential() {
        let sink = Arc::new(RecordingSink::default());
        let random = SequenceRandom::new(vec![0.9, 0.1, 0.9]);
        // width 1 keeps the draw order aligned with the item order
        let pipeline = pipeline(random, 3, 1, sink);

        let items = pipeline.extract().await.unwrap();
        let report = pipeline.process(items).await.unwrap();

        assert_eq!(report.processed, vec!["Processed Item 0", "Processed Item 2"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].item.id, 1);
        assert_eq!(report.total(), 3);
    }

    #[tokio::test]
    async fn test_process_rejects_zero_width() {
        let sink = Arc::new(RecordingSink::default());
        let pipeline = pipeline(FixedRandom { value: 0.5 }, 3, 0, sink);

        let items = pipeline.extract().await.unwrap();
        let error = pipeline.process(items).await.unwrap_err();

        assert!(matches!(error, PipelineError::StreamError { .. }));
    }

    #[tokio::test]
    async fn test_process_empty_list_completes() {
        let sink = Arc::new(RecordingSink::default());
        let pipeline = pipeline(FixedRandom { value: 0.5 }, 0, 4, sink.clone());

        let report = pipeline.process(Vec::new()).await.unwrap();

        assert_eq!(report.total(), 0);
        assert_eq!(sink.lines(), vec!["✅ All metadata processed."]);
    }
}
