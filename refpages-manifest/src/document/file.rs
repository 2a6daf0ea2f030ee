use std::path::{Path, PathBuf};

use super::{
    Document,
    parse::{parse_file, resolve_index},
};
use crate::{Error, Result};

/// A reference document on disk with both raw content and parsed tree.
#[derive(Debug)]
pub struct DocumentFile {
    path: PathBuf,
    content: String,
    document: Document,
}

impl DocumentFile {
    /// Open and parse a document file, or `index.yaml` inside a directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = resolve_index(path.as_ref());
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let document = parse_file(&path, &content)?;

        Ok(Self {
            path,
            content,
            document,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content of the root file.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Consume the file and return the parsed document.
    pub fn into_document(self) -> Document {
        self.document
    }
}
