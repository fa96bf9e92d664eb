pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::{ConsoleSink, ThreadRandom};
pub use config::CliConfig;
pub use core::{engine::PipelineEngine, pipeline::MetadataPipeline, processor::MetadataProcessor};
pub use domain::model::{metadata_list, Metadata, RunReport};
pub use utils::error::{PipelineError, Result};
