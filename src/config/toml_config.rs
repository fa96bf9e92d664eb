use crate::core::processor::FAILURE_THRESHOLD;
use crate::core::ConfigProvider;
use crate::utils::error::{PipelineError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub items: ItemsConfig,
    pub processing: Option<ProcessingConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsConfig {
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub concurrent_items: Option<usize>,
    pub failure_threshold: Option<f64>,
    pub delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PipelineError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PipelineError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ITEM_COUNT}); 未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("pipeline.name", &self.pipeline.name)?;
        validate_positive_number("items.count", self.items.count, 1)?;

        if let Some(processing) = &self.processing {
            if let Some(concurrent) = processing.concurrent_items {
                validate_positive_number("processing.concurrent_items", concurrent, 1)?;
            }
            if let Some(threshold) = processing.failure_threshold {
                validate_range("processing.failure_threshold", threshold, 0.0, 1.0)?;
            }
            if let Some(delay) = processing.delay_ms {
                validate_range("processing.delay_ms", delay, 0, 60_000)?;
            }
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn item_count(&self) -> usize {
        self.items.count
    }

    fn concurrent_items(&self) -> usize {
        self.processing
            .as_ref()
            .and_then(|p| p.concurrent_items)
            .unwrap_or(4)
    }

    fn failure_threshold(&self) -> f64 {
        self.processing
            .as_ref()
            .and_then(|p| p.failure_threshold)
            .unwrap_or(FAILURE_THRESHOLD)
    }

    fn processing_delay(&self) -> Duration {
        let delay_ms = self.processing.as_ref().and_then(|p| p.delay_ms).unwrap_or(100);
        Duration::from_millis(delay_ms)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
