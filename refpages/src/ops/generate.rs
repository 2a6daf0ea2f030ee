//! Generate operation - page rendering and publication.

use std::path::Path;

use eyre::{Result, WrapErr};
use refpages_codegen::generation;
use refpages_manifest::Document;

use crate::{
    project::Project,
    reports::{GenerateReport, GenerationResult, PreviewFile, PreviewResult, PublishedResult},
};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// The document file that was loaded.
    pub input: &'a Path,
    /// Where and how pages are generated.
    pub project: &'a Project,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the generate operation.
///
/// Renders the whole tree first; only a complete tree is published.
pub fn generate(document: &Document, opts: GenerateOptions) -> Result<GenerateReport> {
    let registry = refpages_codegen::render(&document.root, &opts.project.render_options())
        .wrap_err("Failed to render pages")?;

    let result = if opts.dry_run {
        let files = registry
            .preview()
            .into_iter()
            .map(|entry| PreviewFile {
                path: entry.path,
                content: entry.content,
            })
            .collect();
        GenerationResult::Preview(PreviewResult { files })
    } else {
        let report = generation::publish(&registry, &opts.project.output).wrap_err_with(|| {
            format!(
                "Failed to publish pages to '{}'",
                opts.project.output.display()
            )
        })?;
        GenerationResult::Published(PublishedResult {
            output: report.output,
            files: report.files,
            replaced: report.replaced,
            cleanup_error: report.cleanup_error,
        })
    };

    Ok(GenerateReport {
        input: opts.input.to_path_buf(),
        result,
    })
}
