use anyhow::Result;
use fern::colors::{Color, ColoredLevelConfig};
use fern::Dispatch;
use log::LevelFilter;
use std::path::Path;

/// Timestamp format used in the log file
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Verbosity level for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Error messages only
    Error,
    /// Warning and error messages
    Warning,
    /// Info, warning, and error messages (default)
    Info,
    /// Debug, info, warning, and error messages
    Debug,
    /// Trace, debug, info, warning, and error messages
    Trace,
}

impl LogLevel {
    /// Convert verbosity level to log::LevelFilter
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }

    /// Get the verbosity level from the number of occurrences of a flag
    pub fn from_occurrences(occurrences: u8) -> Self {
        match occurrences {
            0 => LogLevel::Info,  // Default
            1 => LogLevel::Debug, // -v
            _ => LogLevel::Trace, // -vv or more
        }
    }

    /// Raise the level to at least `Debug` when debug logging is switched on
    pub fn with_debug(self, debug: bool) -> Self {
        if debug { self.max(LogLevel::Debug) } else { self }
    }
}

/// Format a single log file line
pub fn format_line(timestamp: &str, level: log::Level, message: &str) -> String {
    format!("[{timestamp} {level}] {message}")
}

/// Initialise the logger with the specified verbosity level
///
/// Messages go to the log file (when one is given) and to stderr. Stdout is
/// left untouched because the archive reads the result path from it.
///
/// A log file that cannot be opened does not stop the run; the logger falls
/// back to stderr only and says so once it is up.
pub fn init_logger(verbosity: LogLevel, log_file: Option<&Path>) -> Result<()> {
    let base_logger = Dispatch::new().level(verbosity.to_level_filter());

    let colors_line = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::White)
        .debug(Color::White)
        .trace(Color::BrightBlack);
    let use_colors = atty::is(atty::Stream::Stderr);

    let console_logger = Dispatch::new()
        .format(move |out, message, record| {
            if use_colors {
                out.finish(format_args!(
                    "\x1B[{}m{}\x1B[0m",
                    colors_line.get_color(&record.level()).to_fg_str(),
                    message
                ))
            } else {
                out.finish(format_args!("{message}"))
            }
        })
        .level(verbosity.to_level_filter())
        .chain(std::io::stderr());

    let mut open_failure = None;
    let file_sink = match log_file {
        Some(path) => match fern::log_file(path) {
            Ok(file) => Some(file),
            Err(e) => {
                open_failure = Some(format!(
                    "Cannot open log file {}: {e}",
                    path.display()
                ));
                None
            }
        },
        None => None,
    };

    if let Some(file) = file_sink {
        let file_logger = Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "{}",
                    format_line(
                        &chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
                        record.level(),
                        &message.to_string()
                    )
                ))
            })
            .level(verbosity.to_level_filter())
            .chain(file);
        base_logger
            .chain(file_logger)
            .chain(console_logger)
            .apply()?;
    } else {
        base_logger.chain(console_logger).apply()?;
    }

    if let Some(warning) = open_failure {
        log::warn!("{warning}");
    }
    log::debug!("Logger initialized with verbosity level: {verbosity:?}");

    Ok(())
}
