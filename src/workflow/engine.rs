//! Workflow engine
//!
//! This module contains the engine that runs the preview hook for one
//! source file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};

use crate::config::Quality;
use crate::errors::{input_not_found_error, path_operation_error};
use crate::file_ops::{copy_proxy, remove_temporary_files, write_placeholder_image};
use crate::path_gen::rewrite;

use super::context::{RenderPlan, RenderedProxies, WorkflowContext};

/// Generates the proxies for `input` and returns the file for the archive
///
/// This function orchestrates the workflow steps:
/// 1. Check that the input exists
/// 2. Render every tier an enabled output needs into the temp directory
/// 3. Copy the workflow proxy to the destination computed from the input path
/// 4. Pick the file handed back to the archive (a placeholder image when no
///    preview is wanted) and remove the other temporary renders
///
/// # Errors
/// * Returns an error if the input is missing
/// * Returns an error if any render, the copy or the placeholder fails
pub fn generate_proxies(input: &Path, context: &WorkflowContext) -> Result<PathBuf> {
    if !input.is_file() {
        return Err(input_not_found_error(input.to_path_buf()).into());
    }

    let config = &context.config;
    let stem = input
        .file_stem()
        .ok_or_else(|| path_operation_error(input.to_path_buf(), "get stem of"))?
        .to_string_lossy()
        .into_owned();

    let plan = RenderPlan::from_outputs(&config.output);
    debug!("Render plan: {plan:?}");

    let mut rendered = RenderedProxies::default();
    for quality in plan.tiers() {
        let output = context.render_path(&stem, quality);
        let label = format!("{}_quality", quality.label());
        let encoded = context
            .ffmpeg
            .encode(input, &output, config.profile(quality), &label)
            .with_context(|| format!("Failed to generate {} quality proxy", quality.label()));
        if let Err(e) = encoded {
            remove_temporary_files(rendered.paths().chain([output.as_path()]), None);
            return Err(e);
        }
        rendered.set(quality, output);
    }

    match deliver(input, context, &rendered) {
        Ok(return_path) => {
            remove_temporary_files(rendered.paths(), Some(return_path.as_path()));
            Ok(return_path)
        }
        Err(e) => {
            remove_temporary_files(rendered.paths(), None);
            Err(e)
        }
    }
}

/// Stores the workflow proxy and picks the file handed back to the archive
fn deliver(input: &Path, context: &WorkflowContext, rendered: &RenderedProxies) -> Result<PathBuf> {
    let config = &context.config;
    if config.output.workflow_store {
        store_workflow_proxy(input, context, rendered)?;
    }

    let return_path = if config.output.p5_preview {
        let source = config.output.p5_preview_source;
        rendered
            .get(source)
            .map(Path::to_path_buf)
            .ok_or_else(|| anyhow!("No {} proxy was rendered", source.label()))?
    } else {
        let placeholder = context.placeholder_path();
        write_placeholder_image(&placeholder)?;
        info!("P5 preview disabled, returning dummy image");
        placeholder
    };

    if !return_path.is_file() {
        return Err(anyhow!("Return path invalid: {}", return_path.display()));
    }

    Ok(return_path)
}

/// Copies the rendered tier selected for storage next to the project
fn store_workflow_proxy(
    input: &Path,
    context: &WorkflowContext,
    rendered: &RenderedProxies,
) -> Result<PathBuf> {
    let config = &context.config;
    let source_quality: Quality = config.output.workflow_store_source;
    let source = rendered
        .get(source_quality)
        .ok_or_else(|| anyhow!("No {} proxy was rendered", source_quality.label()))?;

    let container = config.profile(source_quality).container();
    let rewritten = rewrite(input, &container, &config.workflow_path);
    if let Some(warning) = &rewritten.warning {
        warn!("{warning}");
    }

    copy_proxy(source, &rewritten.path)?;
    info!("Stored workflow proxy: {}", rewritten.path.display());

    Ok(rewritten.path)
}
