//! Project configuration from `refpages.toml`.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;

use crate::{Error, Result};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "refpages.toml";

/// Project configuration.
///
/// Every setting is optional; relative paths are resolved against the
/// directory holding the configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Directory relative paths are resolved against
    #[serde(skip)]
    base_dir: PathBuf,
}

/// The `[input]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Root document, or a directory holding `index.yaml`
    #[serde(default = "default_input")]
    pub path: PathBuf,
}

/// The `[output]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory the generated tree is published to
    #[serde(default = "default_output")]
    pub dir: PathBuf,

    /// Extension of generated page files
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_input() -> PathBuf {
    PathBuf::from("index.yaml")
}

fn default_output() -> PathBuf {
    PathBuf::from("ref")
}

fn default_extension() -> String {
    "rst".to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output(),
            extension: default_extension(),
        }
    }
}

impl FromStr for Config {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, CONFIG_FILE)
    }
}

impl Config {
    /// Parse a configuration file; paths resolve against its directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut config = Self::from_str_with_filename(&content, &path.display().to_string())?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(config)
    }

    /// Parse configuration from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::config_parse(e, content, filename))?;
        if config.output.extension.is_empty() || config.output.extension.contains(['/', '\\']) {
            return Err(Error::config_value(
                "output.extension",
                "must be a non-empty file extension",
                content,
                filename,
            ));
        }
        Ok(config)
    }

    /// Load `refpages.toml` from `dir` if present, otherwise use defaults.
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let path = dir.join(CONFIG_FILE);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "Loading configuration");
            Self::from_file(path)
        } else {
            Ok(Self {
                base_dir: dir.to_path_buf(),
                ..Self::default()
            })
        }
    }

    /// Path of the root document, resolved against the configuration directory.
    pub fn input_path(&self) -> PathBuf {
        self.base_dir.join(&self.input.path)
    }

    /// Output directory, resolved against the configuration directory.
    pub fn output_dir(&self) -> PathBuf {
        self.base_dir.join(&self.output.dir)
    }

    /// Extension of generated page files.
    pub fn extension(&self) -> &str {
        &self.output.extension
    }
}
