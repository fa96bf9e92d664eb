use anyhow::Context;
use clap::Parser;
use meta_pipeline::config::toml_config::TomlConfig;
use meta_pipeline::core::greeting;
use meta_pipeline::domain::ports::{ConfigProvider, ProgressSink};
use meta_pipeline::utils::{logger, validation::Validate};
use meta_pipeline::{
    CliConfig, ConsoleSink, MetadataPipeline, PipelineEngine, RunReport, ThreadRandom,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting meta-pipeline CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let sink: Arc<dyn ProgressSink> = Arc::new(ConsoleSink);
    greeting::hello(sink.as_ref());

    let outcome = if let Some(path) = &config.config {
        let file_config = TomlConfig::from_file(path)
            .with_context(|| format!("Failed to load config file: {}", path))?;
        check_config(&file_config);

        tracing::info!(
            "Running pipeline '{}' v{} from {}",
            file_config.pipeline.name,
            file_config.pipeline.version,
            path
        );
        let monitor_enabled = config.monitor || file_config.monitoring_enabled();
        run_pipeline(file_config, monitor_enabled, sink).await
    } else {
        check_config(&config);

        if config.monitor {
            tracing::info!("🔍 System monitoring enabled");
        }
        let monitor_enabled = config.monitor;
        run_pipeline(config.clone(), monitor_enabled, sink).await
    };

    match outcome {
        Ok(report) => {
            tracing::info!(
                "✅ Pipeline run finished: {}/{} items processed",
                report.processed.len(),
                report.total()
            );

            if config.summary {
                let json = report
                    .to_json()
                    .context("Failed to serialize run summary")?;
                tracing::info!("📋 Run summary: {}", json);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Pipeline run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                meta_pipeline::utils::error::ErrorSeverity::Low => 0,
                meta_pipeline::utils::error::ErrorSeverity::Medium => 2,
                meta_pipeline::utils::error::ErrorSeverity::High => 1,
                meta_pipeline::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

// 驗證配置
fn check_config<C: Validate>(config: &C) {
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }
}

async fn run_pipeline<C>(
    config: C,
    monitor_enabled: bool,
    sink: Arc<dyn ProgressSink>,
) -> meta_pipeline::Result<RunReport>
where
    C: ConfigProvider + 'static,
{
    let pipeline = MetadataPipeline::new(ThreadRandom, config, sink.clone());
    let engine = PipelineEngine::new_with_monitoring(pipeline, sink, monitor_enabled);
    engine.run().await
}
