//! Preview hook for archive platforms
//!
//! Renders a small preview and/or a workflow proxy of a media file with
//! FFmpeg, stores the workflow proxy next to its project and reports the
//! preview path to the calling archive.

use std::path::PathBuf;

use anyhow::Result;
use clap::ArgMatches;
use log::{error, info};

pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod file_ops;
pub mod logging;
pub mod path_gen;
pub mod platform;
pub mod transcode;
pub mod workflow;

pub mod prelude {
    pub use crate::cli::{build_command, get_matches};
    pub use crate::config::{Config, Quality, QualityProfile, WorkflowPathConfig};
    pub use crate::errors::{
        Error, Result, file_operation_error, generic_error, input_not_found_error,
        invalid_config_error, transcode_error,
    };
    pub use crate::logging::{LogLevel, init_logger};
    pub use crate::path_gen::{RewriteWarning, RewrittenPath, rewrite};
    pub use crate::perform_hook_based_on_arguments;
    pub use crate::platform::Platform;
    pub use crate::workflow::{WorkflowContext, generate_proxies};
}

use crate::cli::{get_config_path, get_input, get_log_file, get_verbosity};
use crate::config::read_or_default;
use crate::constants::RUN_SEPARATOR;
use crate::logging::init_logger;
use crate::platform::Platform;
use crate::workflow::{WorkflowContext, generate_proxies};

/// Runs the hook for the parsed command line
///
/// Sets up logging, loads and validates the configuration and generates the
/// proxies. Errors are logged before they are returned.
///
/// # Returns
/// * `Result<PathBuf>` - The file the archive should use as preview
pub fn perform_hook_based_on_arguments(matches: &ArgMatches) -> Result<PathBuf> {
    let platform = Platform::detect();
    let loaded = read_or_default(&get_config_path(matches));

    let debug = loaded.as_ref().is_ok_and(|(config, _)| config.logging.debug);
    let verbosity = get_verbosity(matches).with_debug(debug);
    let log_file = get_log_file(matches, loaded.as_ref().ok().map(|(c, _)| c), &platform);
    if let Err(e) = init_logger(verbosity, log_file.as_deref()) {
        eprintln!("Failed to initialise logging: {e}");
    }

    let result = run(matches, loaded, platform);
    if let Err(e) = &result {
        error!("{e:#}");
    }
    result
}

fn run(
    matches: &ArgMatches,
    loaded: Result<(config::Config, Option<PathBuf>)>,
    platform: Platform,
) -> Result<PathBuf> {
    let (config, origin) = loaded?;
    match origin {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => info!("No configuration file found, using built-in defaults"),
    }
    config.validate()?;

    let input = get_input(matches)?;
    let context = WorkflowContext::new(config, platform);

    info!("{RUN_SEPARATOR}");
    info!("Processing: {}", input.display());

    let return_path = generate_proxies(&input, &context)?;

    info!("Returning to P5: {}", return_path.display());
    info!("{RUN_SEPARATOR}");

    Ok(return_path)
}
