//! Configuration module
//!
//! This module contains components for loading and validating configuration.

mod loader;
mod model;

pub use loader::{
    expand_path, load_config, parse_config, read_config, read_or_default, resolve_config_path,
};
pub use model::{
    Config, LoggingConfig, OutputSelection, ProfileSettings, Quality, QualityProfile,
    TranscoderConfig, WorkflowPathConfig,
};
