//! Path generation module
//!
//! This module computes the destination of workflow proxies.

mod rewriter;

pub use rewriter::{RewriteWarning, RewrittenPath, remove_levels, replace_base, rewrite};
