use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};

/// A generated page file, addressed relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    /// Create a new file with the given relative path and content.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the path relative to the output root.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the full path of this file under `base`.
    pub fn full_path(&self, base: &Path) -> PathBuf {
        base.join(&self.path)
    }

    /// Write the file under `base`, creating parent directories as needed.
    pub fn write(&self, base: &Path) -> Result<()> {
        let path = self.full_path(base);
        write_file(&path, &self.content)
            .wrap_err_with(|| format!("failed to write '{}'", path.display()))
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("index.rst");

        write_file(&path, "hello").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("c").join("index.rst");

        write_file(&path, "nested").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_file_write_under_base() {
        let temp = TempDir::new().unwrap();

        let file = File::new("widgets/resize/index.rst", "content");
        file.write(temp.path()).unwrap();

        let written = temp.path().join("widgets/resize/index.rst");
        assert_eq!(file.full_path(temp.path()), written);
        assert_eq!(fs::read_to_string(&written).unwrap(), "content");
    }

    #[test]
    fn test_file_write_reports_path_on_failure() {
        let temp = TempDir::new().unwrap();
        // A regular file where a directory is needed
        fs::write(temp.path().join("blocked"), "").unwrap();

        let file = File::new("blocked/index.rst", "content");
        let err = file.write(temp.path()).unwrap_err();

        assert!(err.to_string().contains("blocked"));
    }
}
