use image::ImageError;
use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Custom error type for the proxy generator
#[derive(Debug)]
pub enum Error {
    /// Error related to file operations
    FileOperation {
        source: io::Error,
        path: PathBuf,
        operation: String,
    },
    /// Error related to path operations
    PathOperation { path: PathBuf, operation: String },
    /// Error related to configuration parsing
    ConfigParsing {
        source: Box<dyn StdError + Send + Sync>,
        detail: String,
    },
    /// A configuration value that parses but cannot be acted upon
    InvalidConfig { field: String, detail: String },
    /// The transcoder binary could not be started
    ProcessSpawn { source: io::Error, program: PathBuf },
    /// The transcoder ran but reported failure
    Transcode {
        label: String,
        status: Option<i32>,
        output: PathBuf,
    },
    /// The source media file handed to the hook does not exist
    InputNotFound { path: PathBuf },
    /// Error while writing an image
    Image { source: ImageError, path: PathBuf },
    /// Generic error with a message
    Generic { message: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FileOperation {
                path, operation, ..
            } => {
                write!(f, "Failed to {} file: {}", operation, path.display())
            }
            Error::PathOperation { path, operation } => {
                write!(f, "Failed to {} path: {}", operation, path.display())
            }
            Error::ConfigParsing { detail, .. } => {
                write!(f, "Configuration parsing error: {detail}")
            }
            Error::InvalidConfig { field, detail } => {
                write!(f, "Invalid configuration value for '{field}': {detail}")
            }
            Error::ProcessSpawn { program, .. } => {
                write!(f, "Failed to start transcoder: {}", program.display())
            }
            Error::Transcode {
                label,
                status,
                output,
            } => match status {
                Some(code) => write!(
                    f,
                    "FFmpeg failed with exit code {code} while generating {label}: {}",
                    output.display()
                ),
                None => write!(
                    f,
                    "FFmpeg was terminated while generating {label}: {}",
                    output.display()
                ),
            },
            Error::InputNotFound { path } => {
                write!(f, "Input file not found: {}", path.display())
            }
            Error::Image { path, .. } => {
                write!(f, "Failed to write image: {}", path.display())
            }
            Error::Generic { message } => {
                write!(f, "{message}")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::FileOperation { source, .. } => Some(source),
            Error::ConfigParsing { source, .. } => Some(source.as_ref()),
            Error::ProcessSpawn { source, .. } => Some(source),
            Error::Image { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Custom Result type for the proxy generator
///
/// # Examples
/// ```
/// use proxy_gen::prelude::{Result, generic_error};
///
/// fn example_function() -> Result<String> {
///     // Return success
///     Ok("success".to_string())
///
///     // Or return an error
///     // Err(generic_error("Something went wrong"))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Helper function to create a file operation error
pub fn file_operation_error(err: io::Error, path: PathBuf, operation: &str) -> Error {
    Error::FileOperation {
        source: err,
        path,
        operation: operation.to_string(),
    }
}

/// Helper function to create a path operation error
pub fn path_operation_error(path: PathBuf, operation: &str) -> Error {
    Error::PathOperation {
        path,
        operation: operation.to_string(),
    }
}

/// Helper function to create a config parsing error
pub fn config_parsing_error<E: StdError + Send + Sync + 'static>(err: E, detail: &str) -> Error {
    Error::ConfigParsing {
        source: Box::new(err),
        detail: detail.to_string(),
    }
}

/// Helper function to create an invalid configuration error
pub fn invalid_config_error(field: &str, detail: &str) -> Error {
    Error::InvalidConfig {
        field: field.to_string(),
        detail: detail.to_string(),
    }
}

/// Helper function to create a process spawn error
pub fn process_spawn_error(err: io::Error, program: PathBuf) -> Error {
    Error::ProcessSpawn {
        source: err,
        program,
    }
}

/// Helper function to create a transcode error
pub fn transcode_error(label: &str, status: Option<i32>, output: PathBuf) -> Error {
    Error::Transcode {
        label: label.to_string(),
        status,
        output,
    }
}

/// Helper function to create an input not found error
pub fn input_not_found_error(path: PathBuf) -> Error {
    Error::InputNotFound { path }
}

/// Helper function to create an image error
pub fn image_error(err: ImageError, path: PathBuf) -> Error {
    Error::Image { source: err, path }
}

/// Helper function to create a generic error
pub fn generic_error(message: &str) -> Error {
    Error::Generic {
        message: message.to_string(),
    }
}
