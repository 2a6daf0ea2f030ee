//! File registration for declarative page generation.
//!
//! Rendering registers every page it produces here; nothing is written until
//! the whole tree has been registered, so a failed render never leaves
//! partial output behind.
//!
//! # Example
//!
//! ```ignore
//! let mut registry = FileRegistry::new();
//!
//! registry.register(File::new("index.rst", root_page))?;
//! registry.register(File::new("resize/index.rst", child_page))?;
//!
//! // Write all files under the staging directory
//! registry.write_all(&staging_dir)?;
//! ```

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use eyre::{Result, bail};
use indexmap::IndexMap;
use refpages_core::File;

/// Registry of generated files, keyed by their path relative to the output root.
///
/// Files keep their registration order. A path can only be registered once.
#[derive(Debug, Default)]
pub struct FileRegistry {
    files: IndexMap<PathBuf, File>,
}

impl FileRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file.
    ///
    /// Fails if a file with the same path was already registered.
    pub fn register(&mut self, file: File) -> Result<()> {
        if self.files.contains_key(file.path()) {
            bail!("'{}' was generated more than once", file.path().display());
        }
        self.files.insert(file.path().to_path_buf(), file);
        Ok(())
    }

    /// Register multiple files, stopping at the first duplicate.
    pub fn register_all(&mut self, files: impl IntoIterator<Item = File>) -> Result<()> {
        for file in files {
            self.register(file)?;
        }
        Ok(())
    }

    /// Find a file whose path is also a directory of another file.
    ///
    /// Returns the file path and the path nested under it.
    pub fn find_conflict(&self) -> Option<(&Path, &Path)> {
        let paths: HashSet<&Path> = self.files.keys().map(PathBuf::as_path).collect();
        self.files.keys().find_map(|path| {
            path.ancestors()
                .skip(1)
                .find(|ancestor| paths.contains(ancestor))
                .map(|ancestor| (ancestor, path.as_path()))
        })
    }

    /// Get all registered files, in registration order.
    pub fn files(&self) -> impl Iterator<Item = &File> {
        self.files.values()
    }

    /// Look up a file by its relative path.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&File> {
        self.files.get(path.as_ref())
    }

    /// Get the number of registered files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Preview all files (returns path and content pairs).
    pub fn preview(&self) -> Vec<PreviewEntry> {
        self.files()
            .map(|file| PreviewEntry {
                path: file.path().display().to_string(),
                content: file.content().to_string(),
            })
            .collect()
    }

    /// Write all files under `base`.
    pub fn write_all(&self, base: &Path) -> Result<WriteStats> {
        let mut stats = WriteStats::default();
        for file in self.files() {
            file.write(base)?;
            stats.written += 1;
            stats.written_paths.push(file.path().to_path_buf());
        }
        Ok(stats)
    }
}

/// A preview entry for displaying what would be generated.
#[derive(Debug, Clone)]
pub struct PreviewEntry {
    /// Relative path from the output directory.
    pub path: String,
    /// File content.
    pub content: String,
}

/// Statistics from a write operation.
#[derive(Debug, Default)]
pub struct WriteStats {
    /// Number of files written.
    pub written: usize,
    /// Paths of written files, relative to the output directory.
    pub written_paths: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_registration_order() {
        let mut registry = FileRegistry::new();
        registry.register(File::new("index.rst", "root")).unwrap();
        registry.register(File::new("b/index.rst", "b")).unwrap();
        registry.register(File::new("a/index.rst", "a")).unwrap();

        let paths: Vec<_> = registry.preview().into_iter().map(|e| e.path).collect();
        assert_eq!(paths, vec!["index.rst", "b/index.rst", "a/index.rst"]);
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let mut registry = FileRegistry::new();
        registry.register(File::new("f/index.rst", "first")).unwrap();

        let err = registry
            .register(File::new("f/index.rst", "second"))
            .unwrap_err();

        assert!(err.to_string().contains("f/index.rst"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("f/index.rst").unwrap().content(), "first");
    }

    #[test]
    fn test_find_conflict() {
        let mut registry = FileRegistry::new();
        registry
            .register_all([
                File::new("index.rst", "root"),
                File::new("index.rst/index.rst", "child"),
                File::new("f/index.rst", "f"),
            ])
            .unwrap();

        assert_eq!(
            registry.find_conflict(),
            Some((Path::new("index.rst"), Path::new("index.rst/index.rst")))
        );
    }

    #[test]
    fn test_sibling_directories_do_not_conflict() {
        let mut registry = FileRegistry::new();
        registry
            .register_all([
                File::new("index.rst", "root"),
                File::new("f/index.rst", "f"),
                File::new("f/g/index.rst", "g"),
            ])
            .unwrap();

        assert_eq!(registry.find_conflict(), None);
    }

    #[test]
    fn test_write_all() {
        let temp = TempDir::new().unwrap();
        let mut registry = FileRegistry::new();
        registry
            .register_all([
                File::new("index.rst", "root"),
                File::new("f/index.rst", "child"),
            ])
            .unwrap();

        let stats = registry.write_all(temp.path()).unwrap();

        assert_eq!(stats.written, 2);
        assert_eq!(
            std::fs::read_to_string(temp.path().join("f/index.rst")).unwrap(),
            "child"
        );
    }
}
