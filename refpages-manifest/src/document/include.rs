//! Resolution of `!include` and `!include-str` tags.

use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value, value::TaggedValue};

use crate::{Error, Result, error::SourceContext};

/// Replaces include tags in a YAML value with the content they point at.
///
/// Include paths are relative to the directory of the root document, for
/// nested includes too.
#[derive(Debug)]
pub(super) struct IncludeResolver {
    base_dir: PathBuf,
    /// Documents currently being resolved, outermost first.
    stack: Vec<PathBuf>,
    /// Text of every document spliced in so far.
    included: Vec<String>,
}

impl IncludeResolver {
    pub(super) fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            stack: Vec::new(),
            included: Vec::new(),
        }
    }

    /// Register the root document so including it again is reported as a cycle.
    pub(super) fn with_root(mut self, path: &Path) -> Self {
        self.stack.push(identity(path));
        self
    }

    /// Take the text of the included documents, in inclusion order.
    ///
    /// `!include-str` text is not listed; it never contributes nodes.
    pub(super) fn into_included(self) -> Vec<String> {
        self.included
    }

    pub(super) fn resolve(&mut self, value: Value) -> Result<Value> {
        match value {
            Value::Tagged(tagged) => self.resolve_tagged(*tagged),
            Value::Mapping(mapping) => {
                let mut resolved = Mapping::with_capacity(mapping.len());
                for (key, value) in mapping {
                    resolved.insert(key, self.resolve(value)?);
                }
                Ok(Value::Mapping(resolved))
            }
            Value::Sequence(sequence) => sequence
                .into_iter()
                .map(|value| self.resolve(value))
                .collect::<Result<Vec<_>>>()
                .map(Value::Sequence),
            other => Ok(other),
        }
    }

    fn resolve_tagged(&mut self, tagged: TaggedValue) -> Result<Value> {
        let TaggedValue { tag, value } = tagged;
        let is_str = if tag == "!include" {
            false
        } else if tag == "!include-str" {
            true
        } else {
            return Err(Box::new(Error::UnknownTag {
                tag: tag.to_string(),
            }));
        };

        let Value::String(relative) = value else {
            return Err(Box::new(Error::IncludeTarget {
                tag: tag.to_string(),
            }));
        };

        let path = self.base_dir.join(&relative);
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        if is_str {
            tracing::debug!(path = %path.display(), "Included text");
            return Ok(Value::String(content));
        }

        let key = identity(&path);
        if self.stack.contains(&key) {
            return Err(Box::new(Error::IncludeCycle { path }));
        }

        let source_ctx = SourceContext::new(content.as_str(), path.display().to_string());
        let value: Value =
            serde_yaml::from_str(&content).map_err(|e| source_ctx.parse_error(e))?;

        tracing::debug!(path = %path.display(), "Included document");
        self.included.push(content);
        self.stack.push(key);
        let resolved = self.resolve(value);
        self.stack.pop();
        resolved
    }
}

fn identity(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
