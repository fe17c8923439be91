//! Workflow context
//!
//! This module defines the state a hook run works with.

use std::path::{Path, PathBuf};

use crate::config::{Config, OutputSelection, Quality};
use crate::platform::Platform;
use crate::transcode::Ffmpeg;

/// Tiers that have to be rendered for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderPlan {
    pub preview: bool,
    pub workflow: bool,
}

impl RenderPlan {
    /// Derives the plan from the enabled outputs
    ///
    /// A tier is rendered once even when it feeds both outputs.
    pub fn from_outputs(outputs: &OutputSelection) -> Self {
        RenderPlan {
            preview: outputs.needs(Quality::Preview),
            workflow: outputs.needs(Quality::Workflow),
        }
    }

    /// Tiers to render, in rendering order
    pub fn tiers(&self) -> Vec<Quality> {
        let mut tiers = Vec::new();
        if self.preview {
            tiers.push(Quality::Preview);
        }
        if self.workflow {
            tiers.push(Quality::Workflow);
        }
        tiers
    }
}

/// Files rendered into the temp directory during a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedProxies {
    pub preview: Option<PathBuf>,
    pub workflow: Option<PathBuf>,
}

impl RenderedProxies {
    pub fn get(&self, quality: Quality) -> Option<&Path> {
        match quality {
            Quality::Preview => self.preview.as_deref(),
            Quality::Workflow => self.workflow.as_deref(),
        }
    }

    pub fn set(&mut self, quality: Quality, path: PathBuf) {
        match quality {
            Quality::Preview => self.preview = Some(path),
            Quality::Workflow => self.workflow = Some(path),
        }
    }

    /// All rendered files
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.preview
            .as_deref()
            .into_iter()
            .chain(self.workflow.as_deref())
    }
}

/// Context for a hook run
///
/// Everything a run depends on is gathered here once at startup.
#[derive(Debug, Clone)]
pub struct WorkflowContext {
    /// The configuration
    pub config: Config,
    /// Archive installation paths
    pub platform: Platform,
    /// Transcoder used for rendering
    pub ffmpeg: Ffmpeg,
    /// Distinguishes temp files of concurrent runs
    pub run_id: u32,
}

impl WorkflowContext {
    /// Creates a new workflow context
    ///
    /// The transcoder is selected from the configuration and the run id is
    /// the process id.
    pub fn new(config: Config, platform: Platform) -> Self {
        let ffmpeg = Ffmpeg::select(config.transcoder.custom_ffmpeg(), &platform);
        WorkflowContext {
            config,
            platform,
            ffmpeg,
            run_id: std::process::id(),
        }
    }

    /// Temp path a tier of `stem` is rendered to
    pub fn render_path(&self, stem: &str, quality: Quality) -> PathBuf {
        let container = self.config.profile(quality).container();
        self.platform.temp_file(format!(
            "{stem}_{}_{}.{container}",
            quality.label(),
            self.run_id
        ))
    }

    /// Temp path of the placeholder image
    pub fn placeholder_path(&self) -> PathBuf {
        self.platform
            .temp_file(format!("proxy_dummy_{}.jpg", self.run_id))
    }
}
