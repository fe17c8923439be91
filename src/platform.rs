//! Archive installation paths
//!
//! The archive exports its installation directory through `AWPST_SRV_HOME`,
//! in Unix notation even on Windows and sometimes wrapped in Tcl braces
//! (`{/C/Program Files/...}`). Everything the hook needs (temp dir, bundled
//! FFmpeg) is resolved relative to that directory.

use std::env;
use std::path::{Component, Path, PathBuf};

use log::debug;

use crate::constants::{DEFAULT_INSTALL_DIR, FFMPEG_EXECUTABLE, SERVER_HOME_VAR};

/// Directories of the archive installation the hook runs under
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    /// Installation directory
    pub install_dir: PathBuf,
    /// Working directory for rendered proxies and the log file
    pub temp_dir: PathBuf,
    /// Directory holding the bundled binaries
    pub bin_dir: PathBuf,
}

impl Platform {
    /// Resolves the installation from the environment, falling back to the
    /// platform default location
    pub fn detect() -> Self {
        match env::var(SERVER_HOME_VAR) {
            Ok(raw) if !raw.trim().is_empty() => {
                debug!("{SERVER_HOME_VAR} is set to {raw}");
                Self::from_install_dir(normalize_path(&raw))
            }
            _ => Self::from_install_dir(PathBuf::from(DEFAULT_INSTALL_DIR)),
        }
    }

    /// Builds the directory layout below a known installation directory
    pub fn from_install_dir(install_dir: PathBuf) -> Self {
        let candidate = install_dir.join("temp");
        let temp_dir = if candidate.is_dir() {
            candidate
        } else {
            env::temp_dir()
        };

        let bin_dir = if cfg!(windows) {
            install_dir.join("bin").join("prevgen")
        } else {
            install_dir.join("bin")
        };

        Platform {
            install_dir,
            temp_dir,
            bin_dir,
        }
    }

    /// Path of the FFmpeg binary shipped with the archive
    pub fn builtin_ffmpeg(&self) -> PathBuf {
        self.bin_dir.join(FFMPEG_EXECUTABLE)
    }

    /// Resolves a file name relative to the temp directory
    ///
    /// Absolute paths are returned unchanged.
    pub fn temp_file(&self, name: impl AsRef<Path>) -> PathBuf {
        self.temp_dir.join(name)
    }
}

/// Strips Tcl braces surrounding a path
pub fn strip_braces(path: &str) -> &str {
    path.strip_prefix('{')
        .and_then(|p| p.strip_suffix('}'))
        .unwrap_or(path)
}

/// Converts a Unix-style drive path (`/C/Program Files`) to Windows notation
///
/// Returns `None` when the path does not start with a single-letter drive
/// component.
pub fn unix_drive_to_windows(path: &str) -> Option<String> {
    let mut chars = path.chars();
    let (Some('/'), Some(drive), Some('/')) = (chars.next(), chars.next(), chars.next()) else {
        return None;
    };
    if !drive.is_ascii_alphabetic() {
        return None;
    }
    let rest = &path[3..];
    Some(format!("{drive}:\\{}", rest.replace('/', "\\")))
}

/// Converts an archive-supplied path to native form
pub fn normalize_path(raw: &str) -> PathBuf {
    let path = strip_braces(raw.trim());

    if cfg!(windows)
        && let Some(converted) = unix_drive_to_windows(path)
    {
        return PathBuf::from(converted);
    }

    lexical_normalize(Path::new(path))
}

/// Removes `.` components and redundant separators without touching the disk
pub fn lexical_normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
