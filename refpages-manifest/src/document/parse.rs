//! Document parsing from files and strings.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use serde_yaml::Value;

use super::{
    Document, deserialize::RawNode, include::IncludeResolver, validate::ParseContext,
    validate::validate_directories,
};
use crate::{Error, Result, error::SourceContext};

/// File name looked up when a directory is given as the document path.
pub const INDEX_FILE: &str = "index.yaml";

impl FromStr for Document {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_document(s, INDEX_FILE, Path::new("."))
    }
}

impl Document {
    /// Load a document from a file, or from `index.yaml` inside a directory.
    ///
    /// Includes are resolved relative to the directory holding the root file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = resolve_index(path.as_ref());
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        parse_file(&path, &content)
    }

    /// Parse a document from a string with a custom filename for error reporting.
    ///
    /// Includes are resolved relative to the current directory.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_document(content, filename, Path::new("."))
    }
}

/// Parse a document, resolving includes relative to `base_dir`.
pub fn parse_document(content: &str, filename: &str, base_dir: &Path) -> Result<Document> {
    parse_root(content, filename, base_dir, None)
}

/// Parse the content of a root document read from `path`.
pub(super) fn parse_file(path: &Path, content: &str) -> Result<Document> {
    tracing::debug!(path = %path.display(), "Loading reference document");
    let base_dir = base_dir_of(path);
    parse_root(content, &path.display().to_string(), &base_dir, Some(path))
}

fn parse_root(
    content: &str,
    filename: &str,
    base_dir: &Path,
    root_path: Option<&Path>,
) -> Result<Document> {
    let source_ctx = SourceContext::new(content, filename);
    let value: Value = serde_yaml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;

    let mut resolver = IncludeResolver::new(base_dir);
    if let Some(path) = root_path {
        resolver = resolver.with_root(path);
    }
    let value = resolver.resolve(value)?;

    let ctx = ParseContext::new(content, filename).with_included(resolver.into_included());
    let raw: RawNode = ctx.decode(value)?;
    let root = raw.into_node(&ctx)?;
    validate_directories(&root, &ctx)?;

    Ok(Document { root })
}

/// Map a directory to the index file inside it.
pub(crate) fn resolve_index(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(INDEX_FILE)
    } else {
        path.to_path_buf()
    }
}

fn base_dir_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
