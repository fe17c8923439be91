//! Configuration data structures
//!
//! This module contains the data structures for configuration. Every section
//! of the YAML file is optional; missing values take the defaults below.

use std::path::{Component, Path, PathBuf};

use anyhow::Result;
use log::warn;
use serde::{Deserialize, Deserializer};

use crate::constants::LOG_FILE_DEFAULT;
use crate::errors::invalid_config_error;
use crate::transcode::Codec;

/// Quality tier a proxy is rendered at
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// Small, fast-decoding tier for in-browser playback
    Preview,
    /// Higher-fidelity tier for editing
    Workflow,
}

impl Quality {
    /// Label used in log messages and temp file names
    pub fn label(&self) -> &'static str {
        match self {
            Quality::Preview => "preview",
            Quality::Workflow => "workflow",
        }
    }
}

/// Which outputs the hook produces and which tier feeds each
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSelection {
    /// Return a preview to the archive
    pub p5_preview: bool,
    /// Tier returned to the archive
    pub p5_preview_source: Quality,
    /// Store a proxy in the project tree
    pub workflow_store: bool,
    /// Tier stored in the project tree
    pub workflow_store_source: Quality,
}

impl OutputSelection {
    /// Whether the tier has to be rendered for any enabled output
    pub fn needs(&self, quality: Quality) -> bool {
        (self.p5_preview && self.p5_preview_source == quality)
            || (self.workflow_store && self.workflow_store_source == quality)
    }
}

impl Default for OutputSelection {
    fn default() -> Self {
        OutputSelection {
            p5_preview: true,
            p5_preview_source: Quality::Preview,
            workflow_store: true,
            workflow_store_source: Quality::Workflow,
        }
    }
}

/// Transcoder selection
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TranscoderConfig {
    /// Custom FFmpeg binary; the archive's bundled one is used when unset
    pub ffmpeg_path: Option<String>,
}

impl TranscoderConfig {
    /// The custom FFmpeg path, if one is configured
    pub fn custom_ffmpeg(&self) -> Option<&Path> {
        non_empty(&self.ffmpeg_path).map(Path::new)
    }
}

/// Where workflow proxies are stored relative to their source
///
/// Three steps are applied to the source directory in order: base
/// replacement at the marker folder, removal of trailing levels, and
/// appending a folder.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WorkflowPathConfig {
    /// Marker directory name searched for in the source path
    pub project_folder: Option<String>,
    /// Replaces everything before the marker
    pub new_base: Option<String>,
    /// Trailing directory components removed after base replacement
    pub remove_levels: u32,
    /// Directory name(s) appended after removal
    pub append_path: Option<String>,
}

impl Default for WorkflowPathConfig {
    fn default() -> Self {
        WorkflowPathConfig {
            project_folder: None,
            new_base: None,
            remove_levels: 1,
            append_path: Some("proxies".to_string()),
        }
    }
}

impl WorkflowPathConfig {
    /// A configuration where every step is a no-op
    pub fn identity() -> Self {
        WorkflowPathConfig {
            project_folder: None,
            new_base: None,
            remove_levels: 0,
            append_path: None,
        }
    }

    /// Marker folder and new base, only when both are set
    pub fn base_replacement(&self) -> Option<(&str, &str)> {
        match (non_empty(&self.project_folder), non_empty(&self.new_base)) {
            (Some(marker), Some(base)) => Some((marker, base)),
            _ => None,
        }
    }

    /// Folder appended in the last step, if any
    pub fn append(&self) -> Option<&str> {
        non_empty(&self.append_path)
    }

    /// Rejects values the rewrite cannot act on sensibly
    pub fn validate(&self) -> Result<()> {
        if let Some(marker) = non_empty(&self.project_folder) {
            if marker.contains(['/', '\\']) {
                return Err(invalid_config_error(
                    "workflow_path.project_folder",
                    &format!("'{marker}' must be a single folder name without path separators"),
                )
                .into());
            }
            if marker == "." || marker == ".." {
                return Err(invalid_config_error(
                    "workflow_path.project_folder",
                    &format!("'{marker}' is not a folder name"),
                )
                .into());
            }
        }

        match (non_empty(&self.project_folder), non_empty(&self.new_base)) {
            (Some(_), None) | (None, Some(_)) => {
                warn!(
                    "project_folder and new_base must both be set; base replacement is skipped"
                );
            }
            (Some(_), Some(base)) if !Path::new(base).is_absolute() => {
                return Err(invalid_config_error(
                    "workflow_path.new_base",
                    &format!("'{base}' must be an absolute path"),
                )
                .into());
            }
            _ => {}
        }

        if let Some(append) = self.append() {
            let path = Path::new(append);
            if path.has_root() || path.is_absolute() {
                return Err(invalid_config_error(
                    "workflow_path.append_path",
                    &format!("'{append}' must be relative"),
                )
                .into());
            }
            if path.components().any(|c| matches!(c, Component::ParentDir)) {
                return Err(invalid_config_error(
                    "workflow_path.append_path",
                    &format!("'{append}' must not contain '..'"),
                )
                .into());
            }
        }

        Ok(())
    }
}

/// Encoding settings of one quality tier
#[derive(Debug, Clone, PartialEq)]
pub struct QualityProfile {
    /// Output width in pixels, height follows the aspect ratio
    pub scale: String,
    /// Audio bitrate
    pub audio_bitrate: String,
    /// Video codec
    pub codec: Codec,
    /// Codec profile for ProRes and DNxHR
    pub codec_profile: String,
    /// Container override, empty for the codec default
    pub container: String,
    /// Video bitrate used with the bundled libopenh264
    pub video_bitrate: String,
    /// Constant rate factor used with libx264
    pub crf: String,
    /// libx264 preset
    pub preset: String,
    /// libx264 tune, empty for none
    pub tune: String,
}

impl QualityProfile {
    /// Speed optimised settings for the archive's browser
    pub fn preview_defaults() -> Self {
        QualityProfile {
            scale: "320".to_string(),
            audio_bitrate: "64k".to_string(),
            codec: Codec::H264,
            codec_profile: String::new(),
            container: String::new(),
            video_bitrate: "256k".to_string(),
            crf: "28".to_string(),
            preset: "veryfast".to_string(),
            tune: "fastdecode".to_string(),
        }
    }

    /// Quality optimised settings for editing
    pub fn workflow_defaults() -> Self {
        QualityProfile {
            scale: "1920".to_string(),
            audio_bitrate: "128k".to_string(),
            codec: Codec::H264,
            codec_profile: String::new(),
            container: String::new(),
            video_bitrate: "5000k".to_string(),
            crf: "18".to_string(),
            preset: "medium".to_string(),
            tune: String::new(),
        }
    }

    /// Container extension the tier is written with
    pub fn container(&self) -> String {
        self.codec.container(&self.container)
    }

    fn validate(&self, section: &str) -> Result<()> {
        if self.scale.trim().is_empty() {
            return Err(invalid_config_error(&format!("{section}.scale"), "must not be empty").into());
        }
        if let Codec::Other(name) = &self.codec {
            warn!("Unknown codec '{name}' in {section}, falling back to H.264");
        }
        Ok(())
    }
}

/// Partial profile as written in the configuration file
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileSettings {
    #[serde(deserialize_with = "scalar_string")]
    pub scale: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub audio_bitrate: Option<String>,
    pub codec: Option<Codec>,
    pub codec_profile: Option<String>,
    pub container: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub video_bitrate: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub crf: Option<String>,
    pub preset: Option<String>,
    pub tune: Option<String>,
}

impl ProfileSettings {
    /// Fills the unset values from the tier defaults
    pub fn resolve(self, base: QualityProfile) -> QualityProfile {
        QualityProfile {
            scale: self.scale.unwrap_or(base.scale),
            audio_bitrate: self.audio_bitrate.unwrap_or(base.audio_bitrate),
            codec: self.codec.unwrap_or(base.codec),
            codec_profile: self.codec_profile.unwrap_or(base.codec_profile),
            container: self.container.unwrap_or(base.container),
            video_bitrate: self.video_bitrate.unwrap_or(base.video_bitrate),
            crf: self.crf.unwrap_or(base.crf),
            preset: self.preset.unwrap_or(base.preset),
            tune: self.tune.unwrap_or(base.tune),
        }
    }
}

/// Logging settings
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log file; relative names live in the archive temp directory
    pub file: String,
    /// Log debug messages
    pub debug: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            file: LOG_FILE_DEFAULT.to_string(),
            debug: false,
        }
    }
}

/// Configuration file as deserialised, before tier defaults are applied
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    pub output: OutputSelection,
    pub transcoder: TranscoderConfig,
    pub workflow_path: WorkflowPathConfig,
    pub preview: ProfileSettings,
    pub workflow: ProfileSettings,
    pub logging: LoggingConfig,
}

/// Configuration of a hook run
///
/// Built once at startup and passed explicitly to everything that needs it.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(from = "RawConfig")]
pub struct Config {
    pub output: OutputSelection,
    pub transcoder: TranscoderConfig,
    pub workflow_path: WorkflowPathConfig,
    pub preview: QualityProfile,
    pub workflow: QualityProfile,
    pub logging: LoggingConfig,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Config {
            output: raw.output,
            transcoder: raw.transcoder,
            workflow_path: raw.workflow_path,
            preview: raw.preview.resolve(QualityProfile::preview_defaults()),
            workflow: raw.workflow.resolve(QualityProfile::workflow_defaults()),
            logging: raw.logging,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

impl Config {
    /// Settings of the given tier
    pub fn profile(&self, quality: Quality) -> &QualityProfile {
        match quality {
            Quality::Preview => &self.preview,
            Quality::Workflow => &self.workflow,
        }
    }

    /// Log file location, resolved against the given temp directory
    pub fn log_file(&self, temp_dir: &Path) -> Option<PathBuf> {
        let file = self.logging.file.trim();
        if file.is_empty() {
            None
        } else {
            Some(temp_dir.join(file))
        }
    }

    /// Validates the configuration
    ///
    /// Only the profiles that will actually be rendered are checked.
    ///
    /// # Errors
    /// Returns an error with a detailed message if validation fails
    pub fn validate(&self) -> Result<()> {
        self.workflow_path.validate()?;

        let output = &self.output;
        if !output.p5_preview && !output.workflow_store {
            warn!("Both outputs are disabled, only a placeholder will be returned");
        }

        for quality in [Quality::Preview, Quality::Workflow] {
            if output.needs(quality) {
                self.profile(quality).validate(quality.label())?;
            }
        }

        Ok(())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Accepts `scale: 480` as well as `scale: "480"`
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
        Scalar::Text(text) => text,
        Scalar::Integer(number) => number.to_string(),
        Scalar::Float(number) => number.to_string(),
    }))
}
