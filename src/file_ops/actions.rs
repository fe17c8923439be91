//! File operation functionality
//!
//! This module contains functions for performing file operations like
//! copying proxies into place and removing temporary renders.

use std::fs::{create_dir_all, remove_file};
use std::path::{Path, PathBuf};

use fs_extra::file::{CopyOptions, copy};
use image::{ImageFormat, Rgb, RgbImage};
use log::{debug, warn};

use crate::constants::{PLACEHOLDER_GREY, PLACEHOLDER_SIZE};
use crate::errors::{Result, file_operation_error, image_error};

/// Copies a rendered proxy to its destination
///
/// The destination directory is created when missing and an existing file
/// is overwritten.
///
/// # Errors
/// * Returns an error if the directory cannot be created or the copy fails
pub fn copy_proxy(source_path: &Path, target_path: &Path) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        create_dir_all(parent)
            .map_err(|e| file_operation_error(e, parent.to_path_buf(), "create directory"))?;
    }

    debug!(
        "Copying file: {} -> {}",
        source_path.display(),
        target_path.display()
    );
    let options = CopyOptions::new().overwrite(true);
    copy(source_path, target_path, &options).map_err(|e| {
        file_operation_error(std::io::Error::other(e), source_path.to_path_buf(), "copy")
    })?;

    Ok(())
}

/// Deletes rendered files that are not handed back to the archive
///
/// Failing to delete a file is logged and otherwise ignored.
///
/// # Returns
/// * `Vec<PathBuf>` - The files that were removed
pub fn remove_temporary_files<'a>(
    candidates: impl IntoIterator<Item = &'a Path>,
    keep: Option<&Path>,
) -> Vec<PathBuf> {
    let mut removed = Vec::new();
    for path in candidates {
        if Some(path) == keep || !path.is_file() {
            continue;
        }
        match remove_file(path) {
            Ok(()) => {
                debug!("Removed temporary file: {}", path.display());
                removed.push(path.to_path_buf());
            }
            Err(e) => warn!("Cannot remove temporary file {}: {e}", path.display()),
        }
    }
    removed
}

/// Writes the small grey JPEG returned when no preview is wanted
///
/// # Errors
/// * Returns an error if the image cannot be written
pub fn write_placeholder_image(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)
            .map_err(|e| file_operation_error(e, parent.to_path_buf(), "create directory"))?;
    }

    let image = RgbImage::from_pixel(
        PLACEHOLDER_SIZE,
        PLACEHOLDER_SIZE,
        Rgb([PLACEHOLDER_GREY; 3]),
    );
    image
        .save_with_format(path, ImageFormat::Jpeg)
        .map_err(|e| image_error(e, path.to_path_buf()))?;

    Ok(())
}
