use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Stream error: {message}")]
    StreamError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Config,
    Processing,
    Stream,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PipelineError {
    pub fn processing(message: impl Into<String>) -> Self {
        Self::ProcessingError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) => ErrorCategory::Io,
            Self::SerializationError(_) => ErrorCategory::Io,
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
            Self::ProcessingError { .. } => ErrorCategory::Processing,
            Self::StreamError { .. } => ErrorCategory::Stream,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 單項處理失敗會被錯誤處理器吞掉, 升級到這裡時只算 Medium
            Self::ProcessingError { .. } => ErrorSeverity::Medium,
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorSeverity::High
            }
            Self::StreamError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Config => {
                "Check the CLI flags or the TOML configuration file".to_string()
            }
            ErrorCategory::Processing => {
                "Re-run the pipeline; failures are randomized".to_string()
            }
            ErrorCategory::Stream => {
                "Check the effective item count and concurrency settings".to_string()
            }
            ErrorCategory::Io => "Check file permissions and available disk space".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ProcessingError { message } => message.clone(),
            Self::ConfigValidationError { field, .. }
            | Self::InvalidConfigValueError { field, .. } => {
                format!("Configuration problem with '{}'", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
