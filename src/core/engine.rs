use crate::domain::model::RunReport;
use crate::domain::ports::{Pipeline, ProgressSink};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::sync::Arc;

pub struct PipelineEngine<P: Pipeline> {
    pipeline: P,
    sink: Arc<dyn ProgressSink>,
    monitor: SystemMonitor,
}

impl<P: Pipeline> PipelineEngine<P> {
    pub fn new(pipeline: P, sink: Arc<dyn ProgressSink>) -> Self {
        Self::new_with_monitoring(pipeline, sink, false)
    }

    pub fn new_with_monitoring(
        pipeline: P,
        sink: Arc<dyn ProgressSink>,
        monitor_enabled: bool,
    ) -> Self {
        Self {
            pipeline,
            sink,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Runs extract then process and reports the final outcome through the
    /// sink. Per-item failures are recovered inside the pipeline; an error
    /// here means the run itself could not proceed.
    pub async fn run(&self) -> Result<RunReport> {
        match self.execute().await {
            Ok(report) => {
                self.sink.emit(&format!(
                    "🎉 Processing completed: {} processed, {} recovered in {}ms",
                    report.processed.len(),
                    report.failures.len(),
                    report.elapsed_ms()
                ));
                Ok(report)
            }
            Err(error) => {
                self.sink.emit(&format!("❌ Stream failed: {}", error));
                Err(error)
            }
        }
    }

    async fn execute(&self) -> Result<RunReport> {
        tracing::info!("Starting metadata pipeline...");

        let items = self.pipeline.extract().await?;
        tracing::info!("Extracted {} metadata records", items.len());
        self.monitor.log_stats("Extract");

        let report = self.pipeline.process(items).await?;
        tracing::info!(
            "Processed {} items ({} recovered failures)",
            report.processed.len(),
            report.failures.len()
        );
        self.monitor.log_stats("Process");
        self.monitor.log_final_stats();

        Ok(report)
    }
}
