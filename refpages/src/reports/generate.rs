//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from page generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Path to the root document.
    pub input: PathBuf,
    /// Generation result (tree published or preview).
    pub result: GenerationResult,
}

/// Result of page generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// The tree was published to the output directory.
    Published(PublishedResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when the tree was published.
#[derive(Debug)]
pub struct PublishedResult {
    /// Output directory.
    pub output: PathBuf,
    /// Pages written, relative to the output directory.
    pub files: Vec<PathBuf>,
    /// Whether a previous tree was replaced.
    pub replaced: bool,
    /// Why the previous tree could not be removed, if it could not.
    pub cleanup_error: Option<String>,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Pages that would be generated.
    pub files: Vec<PreviewFile>,
}

/// A page in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    /// Path relative to the output directory.
    pub path: String,
    /// Page content.
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Published(published) => self.render_published(out, published),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl GenerateReport {
    fn render_published(&self, out: &mut dyn Output, published: &PublishedResult) {
        if let Some(err) = &published.cleanup_error {
            out.warning(err);
        }

        out.key_value("Document", &self.input.display().to_string());
        out.key_value("Published", &published.output.display().to_string());
        if published.replaced {
            out.preformatted("Replaced the previous tree");
        }
        out.newline();

        out.section(&format!("Pages ({})", published.files.len()));
        for file in &published.files {
            out.added_item(&file.display().to_string());
        }
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        let count = preview.files.len();
        out.preformatted(&format!(
            "{} page{} would be generated",
            count,
            if count == 1 { "" } else { "s" }
        ));
    }
}
