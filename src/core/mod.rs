pub mod engine;
pub mod greeting;
pub mod pipeline;
pub mod processor;

pub use crate::domain::model::{Metadata, RunReport};
pub use crate::domain::ports::{ConfigProvider, Pipeline, ProgressSink, RandomSource};
pub use crate::utils::error::Result;
