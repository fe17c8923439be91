//! FFmpeg invocation

use std::fs::create_dir_all;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::QualityProfile;
use crate::errors::{Result, file_operation_error, process_spawn_error, transcode_error};
use crate::platform::Platform;

use super::command::{EncoderMode, build_args};

/// Matches the libx264 line in `ffmpeg -encoders` output
static LIBX264_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*V\S*\s+libx264\s").expect("Failed to compile regex pattern for libx264")
});

/// Whether an `ffmpeg -encoders` listing contains libx264
pub fn lists_libx264(encoders: &str) -> bool {
    LIBX264_RE.is_match(encoders)
}

/// The FFmpeg binary used for a run together with its H.264 encoder
#[derive(Debug, Clone, PartialEq)]
pub struct Ffmpeg {
    program: PathBuf,
    mode: EncoderMode,
}

impl Ffmpeg {
    pub fn new(program: PathBuf, mode: EncoderMode) -> Self {
        Ffmpeg { program, mode }
    }

    /// Picks the custom FFmpeg when it exists and offers libx264, otherwise
    /// the binary bundled with the archive
    pub fn select(custom: Option<&Path>, platform: &Platform) -> Self {
        if let Some(path) = custom {
            if path.is_file() && supports_libx264(path) {
                info!("Using custom FFmpeg with libx264: {}", path.display());
                return Ffmpeg::new(path.to_path_buf(), EncoderMode::Libx264);
            }
            warn!("Custom FFmpeg invalid, using built-in");
        }

        let builtin = platform.builtin_ffmpeg();
        debug!("Using built-in FFmpeg: {}", builtin.display());
        Ffmpeg::new(builtin, EncoderMode::OpenH264)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn mode(&self) -> EncoderMode {
        self.mode
    }

    /// Renders `input` into `output` with the given profile
    ///
    /// The output directory is created when missing. Anything FFmpeg prints
    /// on stderr is written to the log.
    ///
    /// # Errors
    /// * Returns an error if the output directory cannot be created
    /// * Returns an error if FFmpeg cannot be started or exits unsuccessfully
    pub fn encode(
        &self,
        input: &Path,
        output: &Path,
        profile: &QualityProfile,
        label: &str,
    ) -> Result<()> {
        if let Some(parent) = output.parent() {
            create_dir_all(parent)
                .map_err(|e| file_operation_error(e, parent.to_path_buf(), "create directory"))?;
        }
        info!("Generating {label} ({}): {}", profile.codec, output.display());

        let args = build_args(input, output, profile, self.mode);
        debug!("Running {} {:?}", self.program.display(), args);

        let result = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| process_spawn_error(e, self.program.clone()))?;

        let stderr = String::from_utf8_lossy(&result.stderr);
        if !stderr.trim().is_empty() {
            info!("{}", stderr.trim_end());
        }

        if !result.status.success() {
            return Err(transcode_error(label, result.status.code(), output.to_path_buf()));
        }

        info!("Successfully created: {}", output.display());
        Ok(())
    }
}

/// Asks the binary for its encoder list and looks for libx264
fn supports_libx264(program: &Path) -> bool {
    match Command::new(program).arg("-encoders").output() {
        Ok(output) => lists_libx264(&String::from_utf8_lossy(&output.stdout)),
        Err(e) => {
            debug!("Cannot query encoders of {}: {e}", program.display());
            false
        }
    }
}
