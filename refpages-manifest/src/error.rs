use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for document operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
///
/// # Example
///
/// ```ignore
/// let ctx = SourceContext::new(content, "index.yaml");
/// ctx.validation_error("missing required field", None);
/// ctx.invalid_slug_error("a/b", "contains '/'", span);
/// ```
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a YAML error.
    pub fn parse_error(&self, source: serde_yaml::Error) -> Box<Error> {
        let span = source
            .location()
            .map(|location| SourceSpan::from(location.index()));
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error with an optional span.
    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    /// Create an unknown entity kind error.
    pub fn unknown_kind_error(
        &self,
        kind: impl Into<String>,
        location: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::UnknownKind {
            src: self.named_source(),
            span,
            kind: kind.into(),
            location: location.into(),
        })
    }

    /// Create an invalid slug error.
    pub fn invalid_slug_error(
        &self,
        slug: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidSlug {
            src: self.named_source(),
            span,
            slug: slug.into(),
            reason: reason.into(),
        })
    }

    /// Create a duplicate slug error.
    pub fn duplicate_slug_error(
        &self,
        slug: impl Into<String>,
        directory: impl Into<String>,
        first_span: Option<SourceSpan>,
        second_span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::DuplicateSlug {
            src: self.named_source(),
            first_span,
            second_span,
            slug: slug.into(),
            directory: directory.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("check that the path exists and is readable"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML document")]
    #[diagnostic(code(refpages::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported tag '{tag}'")]
    #[diagnostic(
        code(refpages::unknown_tag),
        help("supported tags are !include and !include-str")
    )]
    UnknownTag { tag: String },

    #[error("'{tag}' must be tagged on a string scalar")]
    #[diagnostic(
        code(refpages::include_target),
        help("write the path to include as a plain string, e.g. `!include types.yaml`")
    )]
    IncludeTarget { tag: String },

    #[error("'{path}' includes itself")]
    #[diagnostic(code(refpages::include_cycle))]
    IncludeCycle { path: PathBuf },

    #[error("node at '{location}' is malformed: {source}")]
    #[diagnostic(
        code(refpages::shape),
        help("check the field types of this node; text fields must be strings")
    )]
    Shape {
        location: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("node at '{location}' {reason}")]
    #[diagnostic(
        code(refpages::node_shape),
        help("a node must have exactly one of 'page', 'ent-page' or 'rst'")
    )]
    NodeShape { location: String, reason: String },

    #[error("unknown entity kind '{kind}' at '{location}'")]
    #[diagnostic(
        code(refpages::unknown_kind),
        help("valid kinds are: struct, class, type, fn, ctor, const, var, concept")
    )]
    UnknownKind {
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown kind")]
        span: Option<SourceSpan>,
        kind: String,
        location: String,
    },

    #[error("{message}")]
    #[diagnostic(code(refpages::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid slug '{slug}'")]
    #[diagnostic(
        code(refpages::invalid_slug),
        help("{reason}. A slug names a single output directory; set 'slug' explicitly.")
    )]
    InvalidSlug {
        #[source_code]
        src: NamedSource<String>,
        #[label("used as a directory name here")]
        span: Option<SourceSpan>,
        slug: String,
        reason: String,
    },

    #[error("duplicate slug '{slug}' in '{directory}'")]
    #[diagnostic(
        code(refpages::duplicate_slug),
        help("both items would generate into the same directory; give one of them a different 'slug'")
    )]
    DuplicateSlug {
        #[source_code]
        src: NamedSource<String>,
        #[label("first used here")]
        first_span: Option<SourceSpan>,
        #[label("conflicts with first usage")]
        second_span: Option<SourceSpan>,
        slug: String,
        directory: String,
    },

    #[error("failed to parse refpages.toml")]
    #[diagnostic(code(refpages::config_error))]
    ConfigParse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for '{key}': {reason}")]
    #[diagnostic(code(refpages::config_value))]
    ConfigValue {
        #[source_code]
        src: NamedSource<String>,
        #[label("{reason}")]
        span: Option<SourceSpan>,
        key: String,
        reason: String,
    },
}

impl Error {
    /// Create an IO error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }

    /// Create a config parse error from a toml error with source context
    pub fn config_parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::ConfigParse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Create a config value error, pointing at the key's last segment if found
    pub fn config_value(
        key: impl Into<String>,
        reason: impl Into<String>,
        src: &str,
        filename: &str,
    ) -> Box<Self> {
        let key = key.into();
        let field = key.rsplit('.').next().unwrap_or(&key);
        let span = src
            .find(&format!("{field} ="))
            .map(|offset| SourceSpan::from((offset, field.len())));
        Box::new(Error::ConfigValue {
            src: NamedSource::new(filename, src.to_string()),
            span,
            key,
            reason: reason.into(),
        })
    }

    /// Create a shape error for a node that did not deserialize
    pub fn shape(location: impl Into<String>, source: serde_yaml::Error) -> Box<Self> {
        Box::new(Error::Shape {
            location: location.into(),
            source,
        })
    }

    /// Create a node shape error
    pub fn node_shape(location: impl Into<String>, reason: impl Into<String>) -> Box<Self> {
        Box::new(Error::NodeShape {
            location: location.into(),
            reason: reason.into(),
        })
    }
}
