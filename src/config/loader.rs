//! Configuration loading functionality
//!
//! This module contains functions for locating, loading and validating the
//! configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use directories::ProjectDirs;
use log::debug;
use serde_yaml::from_str;
use shellexpand::{full, tilde};

use crate::constants::{APPLICATION, ORGANIZATION, QUALIFIER};
use crate::errors::config_parsing_error;

use super::model::Config;

/// Reads a configuration file without validating it
///
/// Paths in the file are expanded.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed
pub fn read_config(file: &Path) -> Result<Config> {
    let file_content = fs::read(file).map_err(|e| {
        anyhow!(
            "Failed to read configuration file {}: {}",
            file.display(),
            e
        )
    })?;

    let content_str = String::from_utf8(file_content).map_err(|e| {
        anyhow!(
            "Configuration file {} contains invalid UTF-8 characters: {}",
            file.display(),
            e
        )
    })?;

    parse_unvalidated(&content_str, file)
}

/// Loads a configuration from a file
///
/// # Arguments
/// * `file` - Path to the configuration file
///
/// # Returns
/// * `Result<Config>` - The loaded configuration or an error
///
/// # Errors
/// Returns an error if the file cannot be read or if the configuration is invalid
pub fn load_config(file: &Path) -> Result<Config> {
    let config = read_config(file)?;
    config.validate()?;
    Ok(config)
}

/// Parses and validates configuration text
///
/// `origin` is only used in error messages.
pub fn parse_config(content: &str, origin: &Path) -> Result<Config> {
    let config = parse_unvalidated(content, origin)?;
    config.validate()?;
    Ok(config)
}

fn parse_unvalidated(content: &str, origin: &Path) -> Result<Config> {
    let mut config: Config = if content.trim().is_empty() {
        Config::default()
    } else {
        from_str(content).map_err(|e| {
            config_parsing_error(
                e,
                &format!("Please check the YAML syntax of {}", origin.display()),
            )
        })?
    };

    expand_config_paths(&mut config);
    Ok(config)
}

/// Finds the configuration file to use
///
/// The path is taken as given when it exists, otherwise the same name is
/// looked up in the per-user configuration directory.
///
/// # Returns
/// * `Option<PathBuf>` - The configuration file, or `None` when neither exists
pub fn resolve_config_path(config: &Path) -> Option<PathBuf> {
    if config.exists() {
        return Some(config.to_path_buf());
    }
    if config.is_absolute() {
        return None;
    }

    let candidate = config_dir()?.join(config);
    debug!("Looking for configuration in {}", candidate.display());
    candidate.exists().then_some(candidate)
}

/// Reads the configuration file, or takes the built-in defaults when there
/// is none
///
/// Validation is left to the caller so that it can happen once logging is
/// set up from the configuration.
///
/// # Returns
/// * `Result<(Config, Option<PathBuf>)>` - The configuration and the file it came from
///
/// # Errors
/// Returns an error if a configuration file exists but cannot be read
pub fn read_or_default(config: &Path) -> Result<(Config, Option<PathBuf>)> {
    match resolve_config_path(config) {
        Some(path) => Ok((read_config(&path)?, Some(path))),
        None => {
            let mut defaults = Config::default();
            expand_config_paths(&mut defaults);
            Ok((defaults, None))
        }
    }
}

/// Per-user configuration directory of the application
fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|folder| folder.config_dir().to_path_buf())
}

/// Expands `~` and environment variables in a path
///
/// When a variable cannot be resolved only the tilde is expanded and the
/// rest is kept verbatim.
pub fn expand_path(path: &str) -> String {
    match full(path) {
        Ok(expanded) => expanded.to_string(),
        Err(_) => tilde(path).to_string(),
    }
}

fn expand_option(value: &mut Option<String>) {
    if let Some(v) = value.as_mut() {
        *v = expand_path(v);
    }
}

fn expand_config_paths(config: &mut Config) {
    expand_option(&mut config.transcoder.ffmpeg_path);
    expand_option(&mut config.workflow_path.new_base);
    config.logging.file = expand_path(&config.logging.file);
}
