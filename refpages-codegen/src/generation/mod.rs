//! Generated output management.
//!
//! This module provides utilities for materializing rendered pages:
//! - [`FileRegistry`] - Declarative file registration with duplicate detection
//! - [`publish`] - Staged writing and atomic publication of the output tree

mod publish;
mod registry;

pub use publish::{PublishPaths, PublishReport, publish, swap_into_place};
pub use registry::{FileRegistry, PreviewEntry, WriteStats};
