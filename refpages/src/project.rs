//! Resolution of where to read the document and where to publish pages.

use std::path::PathBuf;

use eyre::{Result, bail};
use refpages_codegen::RenderOptions;
use refpages_manifest::Config;

/// Input, output and page options for one run, after command-line overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    /// Root document, or a directory holding `index.yaml`.
    pub input: PathBuf,
    /// Directory the generated tree is published to.
    pub output: PathBuf,
    /// Extension of generated page files.
    pub extension: String,
}

impl Project {
    /// Combine the configuration with command-line overrides.
    ///
    /// Overrides are taken as given, relative to the working directory;
    /// configured paths resolve against the configuration file's directory.
    pub fn resolve(
        config: &Config,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        extension: Option<String>,
    ) -> Result<Self> {
        let extension = extension.unwrap_or_else(|| config.extension().to_string());
        if extension.is_empty() || extension.contains(['/', '\\']) {
            bail!("invalid page extension '{extension}': must be a non-empty file extension");
        }

        let project = Self {
            input: input.unwrap_or_else(|| config.input_path()),
            output: output.unwrap_or_else(|| config.output_dir()),
            extension,
        };
        tracing::debug!(
            input = %project.input.display(),
            output = %project.output.display(),
            extension = %project.extension,
            "Resolved project"
        );
        Ok(project)
    }

    /// Render options for this project's pages.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::default().with_extension(&self.extension)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_defaults_without_config_file() {
        let temp = TempDir::new().unwrap();
        let config = Config::discover(temp.path()).unwrap();

        let project = Project::resolve(&config, None, None, None).unwrap();

        assert_eq!(project.input, temp.path().join("index.yaml"));
        assert_eq!(project.output, temp.path().join("ref"));
        assert_eq!(project.extension, "rst");
    }

    #[test]
    fn test_config_values_resolve_against_its_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("refpages.toml"),
            "[input]\npath = \"docs/ref\"\n\n[output]\ndir = \"site/ref\"\nextension = \"txt\"\n",
        )
        .unwrap();
        let config = Config::discover(temp.path()).unwrap();

        let project = Project::resolve(&config, None, None, None).unwrap();

        assert_eq!(project.input, temp.path().join("docs/ref"));
        assert_eq!(project.output, temp.path().join("site/ref"));
        assert_eq!(project.render_options().index_file(), "index.txt");
    }

    #[test]
    fn test_flags_override_config() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("refpages.toml"),
            "[output]\ndir = \"site/ref\"\n",
        )
        .unwrap();
        let config = Config::discover(temp.path()).unwrap();

        let project = Project::resolve(
            &config,
            Some(PathBuf::from("api.yaml")),
            Some(PathBuf::from("out")),
            Some("rest".to_string()),
        )
        .unwrap();

        assert_eq!(project.input, PathBuf::from("api.yaml"));
        assert_eq!(project.output, PathBuf::from("out"));
        assert_eq!(project.extension, "rest");
    }

    #[test]
    fn test_invalid_extension_flag() {
        let config = Config::default();
        let err = Project::resolve(&config, None, None, Some("a/b".to_string())).unwrap_err();
        assert!(err.to_string().contains("invalid page extension 'a/b'"));

        assert!(Project::resolve(&config, None, None, Some(String::new())).is_err());
    }
}
