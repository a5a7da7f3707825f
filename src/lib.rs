pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, Settings, TomlConfig};
pub use core::engine::GraphEngine;
pub use core::pipeline::{process, process_sources, GraphPipeline};
pub use domain::model::ArchitectureGraph;
pub use utils::error::{GraphError, Result};
