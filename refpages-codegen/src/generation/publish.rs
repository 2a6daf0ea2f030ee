//! Staged publication of a generated tree.
//!
//! The tree is written into a staging directory next to the output path and
//! then renamed onto it, so readers of the output path see either the
//! complete previous tree or the complete new one.

use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
};

use eyre::{Result, WrapErr, eyre};

use super::FileRegistry;

/// Outcome of a successful publication.
#[derive(Debug)]
pub struct PublishReport {
    /// The published output directory.
    pub output: PathBuf,
    /// Files written, relative to the output directory.
    pub files: Vec<PathBuf>,
    /// Whether a previously published tree was replaced.
    pub replaced: bool,
    /// Set when the previous tree could not be removed after publication.
    pub cleanup_error: Option<String>,
}

/// The paths involved in publishing to one output directory.
#[derive(Debug, Clone)]
pub struct PublishPaths {
    /// Final output directory.
    pub output: PathBuf,
    /// Staging directory, `<output>.tmp`.
    pub staging: PathBuf,
    /// Where the previous tree is moved during the swap, `<output>.del`.
    pub aside: PathBuf,
}

impl PublishPaths {
    /// Derive staging and aside paths from the output path.
    pub fn new(output: impl Into<PathBuf>) -> Result<Self> {
        let output = output.into();
        let staging = with_suffix(&output, ".tmp")?;
        let aside = with_suffix(&output, ".del")?;
        Ok(Self {
            output,
            staging,
            aside,
        })
    }
}

fn with_suffix(path: &Path, suffix: &str) -> Result<PathBuf> {
    let name = path
        .file_name()
        .ok_or_else(|| eyre!("output path '{}' has no directory name", path.display()))?;
    let mut name = OsString::from(name);
    name.push(suffix);
    Ok(path.with_file_name(name))
}

/// Write `registry` into a fresh staging directory and publish it at `output`.
///
/// Failures before the final rename leave the published tree untouched and
/// the staging directory in place for inspection.
pub fn publish(registry: &FileRegistry, output: impl Into<PathBuf>) -> Result<PublishReport> {
    let paths = PublishPaths::new(output)?;

    prepare_staging(&paths.staging)?;
    tracing::info!(
        staging = %paths.staging.display(),
        files = registry.len(),
        "Writing staging tree"
    );
    let stats = registry
        .write_all(&paths.staging)
        .wrap_err_with(|| format!("failed to stage output in '{}'", paths.staging.display()))?;

    let replaced = swap_into_place(&paths)?;
    tracing::info!(output = %paths.output.display(), "Published output tree");

    let cleanup_error = if replaced {
        remove_aside(&paths.aside)
    } else {
        None
    };

    Ok(PublishReport {
        output: paths.output,
        files: stats.written_paths,
        replaced,
        cleanup_error,
    })
}

/// Remove a stale staging directory and create an empty one.
fn prepare_staging(staging: &Path) -> Result<()> {
    if staging.exists() {
        tracing::debug!(path = %staging.display(), "Removing stale staging directory");
        remove_path(staging).wrap_err_with(|| {
            format!("failed to remove stale staging '{}'", staging.display())
        })?;
    }
    std::fs::create_dir_all(staging)
        .wrap_err_with(|| format!("failed to create staging '{}'", staging.display()))
}

/// Move the previous tree aside and rename staging onto the output path.
///
/// Returns whether a previous tree was moved aside. If the final rename
/// fails, the previous tree is moved back before the error is returned.
pub fn swap_into_place(paths: &PublishPaths) -> Result<bool> {
    let replaced = paths.output.exists();
    if replaced {
        if paths.aside.exists() {
            tracing::debug!(path = %paths.aside.display(), "Removing stale aside directory");
            remove_path(&paths.aside).wrap_err_with(|| {
                format!("failed to remove stale '{}'", paths.aside.display())
            })?;
        }
        std::fs::rename(&paths.output, &paths.aside).wrap_err_with(|| {
            format!(
                "failed to move '{}' aside to '{}'",
                paths.output.display(),
                paths.aside.display()
            )
        })?;
    }

    if let Err(err) = std::fs::rename(&paths.staging, &paths.output) {
        if replaced {
            if let Err(restore_err) = std::fs::rename(&paths.aside, &paths.output) {
                tracing::error!(
                    aside = %paths.aside.display(),
                    error = %restore_err,
                    "Failed to restore the previous output tree"
                );
            }
        }
        return Err(err).wrap_err_with(|| {
            format!(
                "failed to publish '{}' to '{}'",
                paths.staging.display(),
                paths.output.display()
            )
        });
    }
    Ok(replaced)
}

/// Best-effort removal of the previous tree.
fn remove_aside(aside: &Path) -> Option<String> {
    match remove_path(aside) {
        Ok(()) => None,
        Err(err) => {
            tracing::warn!(
                path = %aside.display(),
                error = %err,
                "Failed to remove the previous output tree"
            );
            Some(format!("failed to remove '{}': {}", aside.display(), err))
        }
    }
}

fn remove_path(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use refpages_core::File;
    use tempfile::TempDir;

    use super::*;

    fn registry(files: &[(&str, &str)]) -> FileRegistry {
        let mut registry = FileRegistry::new();
        for (path, content) in files {
            registry.register(File::new(*path, *content)).unwrap();
        }
        registry
    }

    #[test]
    fn test_failed_cleanup_is_reported() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("ref.del");

        let message = remove_aside(&missing).unwrap();

        assert!(message.contains(&missing.display().to_string()));
    }

    #[test]
    fn test_cleanup_removes_previous_tree() {
        let temp = TempDir::new().unwrap();
        let aside = temp.path().join("ref.del");
        fs::create_dir_all(aside.join("f")).unwrap();
        fs::write(aside.join("f/index.rst"), "old").unwrap();

        assert_eq!(remove_aside(&aside), None);
        assert!(!aside.exists());
    }

    #[test]
    fn test_publish_paths() {
        let paths = PublishPaths::new("/srv/docs/ref").unwrap();
        assert_eq!(paths.staging, PathBuf::from("/srv/docs/ref.tmp"));
        assert_eq!(paths.aside, PathBuf::from("/srv/docs/ref.del"));
    }

    #[test]
    fn test_publish_paths_require_a_name() {
        assert!(PublishPaths::new("/").is_err());
    }

    #[test]
    fn test_publish_fresh_output() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("ref");

        let report = publish(&registry(&[("index.rst", "new")]), &output).unwrap();

        assert!(!report.replaced);
        assert_eq!(report.files, vec![PathBuf::from("index.rst")]);
        assert_eq!(fs::read_to_string(output.join("index.rst")).unwrap(), "new");
        assert!(!temp.path().join("ref.tmp").exists());
        assert!(!temp.path().join("ref.del").exists());
    }

    #[test]
    fn test_publish_replaces_previous_tree() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("ref");
        fs::create_dir_all(output.join("stale")).unwrap();
        fs::write(output.join("stale/index.rst"), "old").unwrap();

        let report = publish(&registry(&[("index.rst", "new")]), &output).unwrap();

        assert!(report.replaced);
        assert_eq!(report.cleanup_error, None);
        assert!(!output.join("stale").exists());
        assert!(!temp.path().join("ref.del").exists());
    }

    #[test]
    fn test_stale_staging_and_aside_are_replaced() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("ref");
        fs::create_dir_all(&output).unwrap();
        fs::create_dir_all(temp.path().join("ref.tmp/leftover")).unwrap();
        fs::create_dir_all(temp.path().join("ref.del")).unwrap();

        publish(&registry(&[("index.rst", "new")]), &output).unwrap();

        assert!(!output.join("leftover").exists());
        assert_eq!(fs::read_to_string(output.join("index.rst")).unwrap(), "new");
    }

    #[test]
    fn test_failed_staging_leaves_output_untouched() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("ref");
        fs::create_dir_all(&output).unwrap();
        fs::write(output.join("index.rst"), "old").unwrap();

        // `index.rst` is written as a file, so the second path cannot be created
        let broken = registry(&[("index.rst", "new"), ("index.rst/index.rst", "nested")]);
        assert!(publish(&broken, &output).is_err());

        assert_eq!(fs::read_to_string(output.join("index.rst")).unwrap(), "old");
        assert_eq!(fs::read_dir(&output).unwrap().count(), 1);
        assert!(temp.path().join("ref.tmp").exists());
    }

    #[test]
    fn test_failed_rename_restores_previous_tree() {
        let temp = TempDir::new().unwrap();
        let paths = PublishPaths::new(temp.path().join("ref")).unwrap();
        fs::create_dir_all(&paths.output).unwrap();
        fs::write(paths.output.join("index.rst"), "old").unwrap();

        // No staging directory exists, so the publishing rename fails
        assert!(swap_into_place(&paths).is_err());

        assert_eq!(
            fs::read_to_string(paths.output.join("index.rst")).unwrap(),
            "old"
        );
        assert!(!paths.aside.exists());
    }
}
