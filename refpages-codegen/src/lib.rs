//! Page generation for refpages.
//!
//! This crate turns a loaded reference document into a tree of
//! reStructuredText pages and publishes it.
//!
//! # Module Organization
//!
//! - [`builder`] - Page building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`render`] - Page, entity and summary table renderers
//! - [`generation`] - Output management (FileRegistry, staged publication)
//!
//! # Example
//!
//! ```no_run
//! use refpages_codegen::{RenderOptions, generate};
//! use refpages_manifest::Document;
//!
//! let document = Document::from_file("docs/ref")?;
//! let report = generate(&document.root, "docs/ref-gen", &RenderOptions::default())?;
//! println!("wrote {} pages", report.files.len());
//! # Ok::<(), eyre::Report>(())
//! ```

pub mod builder;
pub mod generation;
pub mod render;

use std::path::{Path, PathBuf};

use eyre::{Result, bail};
use refpages_core::Scope;
use refpages_manifest::Node;

pub use generation::{FileRegistry, PublishReport};
pub use render::RenderOptions;

/// Render the whole tree rooted at `node` into a registry of page files.
///
/// Nothing is written to disk.
pub fn render(node: &Node, options: &RenderOptions) -> Result<FileRegistry> {
    let renderer = render::PageRenderer::new(options);
    let mut registry = FileRegistry::new();
    registry.register_all(renderer.render_directory(node, &Scope::root(), Path::new("")))?;
    if let Some((file, nested)) = registry.find_conflict() {
        bail!(
            "page '{}' would be written inside '{}', which is also a page; \
             rename the slug that produces it",
            nested.display(),
            file.display()
        );
    }
    tracing::debug!(pages = registry.len(), "Rendered output tree");
    Ok(registry)
}

/// Render the tree rooted at `node` and publish it at `output`.
///
/// The previous tree at `output`, if any, stays in place until the new one is
/// completely written.
pub fn generate(
    node: &Node,
    output: impl Into<PathBuf>,
    options: &RenderOptions,
) -> Result<PublishReport> {
    let registry = render(node, options)?;
    generation::publish(&registry, output)
}
