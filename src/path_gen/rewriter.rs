//! Workflow proxy destination
//!
//! Computes where a workflow proxy is stored from the path of its source.
//! The computation is purely lexical: nothing here touches the filesystem.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::config::WorkflowPathConfig;
use crate::constants::PROXY_SUFFIX;

/// Anomaly noticed while rewriting that the caller should report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteWarning {
    /// The marker folder is not a segment of the source directory
    MarkerNotFound { marker: String },
}

impl fmt::Display for RewriteWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteWarning::MarkerNotFound { marker } => {
                write!(f, "Project folder '{marker}' not found")
            }
        }
    }
}

/// Result of rewriting a source path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenPath {
    /// Destination of the workflow proxy
    pub path: PathBuf,
    /// Set when base replacement was requested but could not be applied
    pub warning: Option<RewriteWarning>,
}

/// Computes the workflow proxy destination for `source`
///
/// The source directory goes through three steps, each skipped when its
/// settings are empty:
///
/// 1. everything up to the first segment equal to the marker folder is
///    replaced by the new base (the marker itself is kept),
/// 2. `remove_levels` trailing components are dropped, stopping at the root,
/// 3. the append path is added.
///
/// When the result is the source directory itself the file name gets a
/// `_proxy` suffix so the proxy cannot overwrite its source.
///
/// ```
/// use std::path::{Path, PathBuf};
/// use proxy_gen::config::WorkflowPathConfig;
/// use proxy_gen::path_gen::rewrite;
///
/// let config = WorkflowPathConfig {
///     project_folder: None,
///     new_base: None,
///     remove_levels: 1,
///     append_path: Some("Proxies".to_string()),
/// };
/// let rewritten = rewrite(Path::new("/media/Day01/B001.mov"), "mp4", &config);
/// assert_eq!(rewritten.path, PathBuf::from("/media/Proxies/B001.mp4"));
/// ```
pub fn rewrite(source: &Path, container: &str, config: &WorkflowPathConfig) -> RewrittenPath {
    let original_dir = source.parent().unwrap_or_else(|| Path::new(""));
    let mut warning = None;

    let replaced = match config.base_replacement() {
        Some((marker, base)) => replace_base(original_dir, marker, Path::new(base))
            .unwrap_or_else(|| {
                warning = Some(RewriteWarning::MarkerNotFound {
                    marker: marker.to_string(),
                });
                original_dir.to_path_buf()
            }),
        None => original_dir.to_path_buf(),
    };

    let mut target_dir = remove_levels(&replaced, config.remove_levels);

    if let Some(append) = config.append() {
        target_dir.push(append);
    }

    let mut file_name: OsString = source
        .file_stem()
        .map(OsStr::to_os_string)
        .unwrap_or_default();
    if target_dir == original_dir {
        file_name.push(PROXY_SUFFIX);
    }
    file_name.push(".");
    file_name.push(container);

    RewrittenPath {
        path: target_dir.join(file_name),
        warning,
    }
}

/// Moves `dir` below `base`, pivoting on the first segment named `marker`
///
/// `.../<marker>/<rest>` becomes `<base>/<marker>/<rest>`. Segments are
/// compared whole, so `Projects` does not match `Projects2024`.
///
/// # Returns
/// * `Option<PathBuf>` - The new directory, or `None` when no segment matches
pub fn replace_base(dir: &Path, marker: &str, base: &Path) -> Option<PathBuf> {
    let wanted = Component::Normal(OsStr::new(marker));
    let mut components = dir.components();
    if !components.by_ref().any(|c| c == wanted) {
        return None;
    }

    let rest = components.as_path();
    let mut replaced = base.join(marker);
    if !rest.as_os_str().is_empty() {
        replaced.push(rest);
    }
    Some(replaced)
}

/// Drops `levels` trailing components, saturating at the root
pub fn remove_levels(dir: &Path, levels: u32) -> PathBuf {
    let mut current = dir;
    for _ in 0..levels {
        match current.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }
    current.to_path_buf()
}
