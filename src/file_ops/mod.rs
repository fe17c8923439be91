//! File operations module
//!
//! This module contains components for copying, cleaning up and
//! placeholder files.

mod actions;

pub use actions::{copy_proxy, remove_temporary_files, write_placeholder_image};
