//! Workflow module
//!
//! This module contains components for orchestrating a hook run.

mod context;
mod engine;

pub use context::{RenderPlan, RenderedProxies, WorkflowContext};
pub use engine::generate_proxies;
