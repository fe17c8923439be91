/// Constants used throughout the application
///
/// This module centralises all constants used in the application to make
/// them easier to manage and update.

/// Qualifier string used for application identification
pub const QUALIFIER: &str = "com";

/// Organisation name used for application identification
pub const ORGANIZATION: &str = "Ondřej Vágner";

/// Application name used for identification
///
/// Used to locate the per-user configuration directory.
pub const APPLICATION: &str = "proxy_gen";

/// Help text for the input argument
pub const INPUT_HELP: &str = "Source media file handed over by the archive";

/// Help text for the config command-line option
pub const CONFIG_HELP: &str = "Read from a specific config file";

/// Help text for the verbose command-line option
pub const VERBOSE_HELP: &str = "Increase verbosity level (can be used multiple times)";

/// Help text for the log file command-line option
pub const LOG_FILE_HELP: &str = "Write the log to this file instead of the configured one";

/// Default path for the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "proxy_generator.yaml";

/// Default log file name, created inside the platform temp directory
pub const LOG_FILE_DEFAULT: &str = "proxy_generator.log";

/// Environment variable the archive sets to its installation directory
pub const SERVER_HOME_VAR: &str = "AWPST_SRV_HOME";

#[cfg(windows)]
pub const DEFAULT_INSTALL_DIR: &str = r"C:\Program Files\ARCHIWARE\Data_Lifecycle_Management_Suite";
#[cfg(not(windows))]
pub const DEFAULT_INSTALL_DIR: &str = "/usr/local/aw";

#[cfg(windows)]
pub const FFMPEG_EXECUTABLE: &str = "ffmpeg.exe";
#[cfg(not(windows))]
pub const FFMPEG_EXECUTABLE: &str = "ffmpeg";

/// Suffix added to a workflow proxy that would land next to its source
pub const PROXY_SUFFIX: &str = "_proxy";

/// Edge length in pixels of the placeholder returned when no preview is wanted
pub const PLACEHOLDER_SIZE: u32 = 64;

/// Grey level of the placeholder image
pub const PLACEHOLDER_GREY: u8 = 128;

/// Separator line framing each run in the log
pub const RUN_SEPARATOR: &str = "========================================";
