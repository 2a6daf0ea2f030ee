//! Validation context and utilities for document parsing.

use std::{collections::HashSet, sync::Arc};

use miette::SourceSpan;
use serde::de::DeserializeOwned;
use serde_yaml::Value;

use super::{Node, PageBody, TableItem};
use crate::{Error, Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// This struct encapsulates the source content, filename, and current path
/// through the document hierarchy, making it easier to pass validation
/// context through recursive operations.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "index.yaml");
/// let nested = ctx.push("page").push("entities[0]");
/// assert_eq!(nested.location(), "page.entities[0]");
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Text of every document spliced in with `!include`
    included: Arc<Vec<String>>,
    /// Path segments for nested validation (e.g., ["page", "entities[0]"])
    path: Vec<String>,
}

impl ParseContext {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            included: Arc::new(Vec::new()),
            path: Vec::new(),
        }
    }

    /// Record the text of included documents.
    ///
    /// Nodes may come from these instead of the root source, so spans are
    /// only reported for values that none of them contain.
    pub fn with_included(mut self, sources: Vec<String>) -> Self {
        self.included = Arc::new(sources);
        self
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: impl Into<String>) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment.into());
        Self {
            source: Arc::clone(&self.source),
            included: Arc::clone(&self.included),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Describe the current position for error messages.
    pub fn location(&self) -> String {
        if self.path.is_empty() {
            "document root".to_string()
        } else {
            self.path_string()
        }
    }

    /// Deserialize the node at this position, reporting failures here.
    pub fn decode<T: DeserializeOwned>(&self, value: Value) -> Result<T> {
        serde_yaml::from_value(value).map_err(|source| Error::shape(self.location(), source))
    }

    /// Find the span of the first `key: value` pair in the source.
    pub fn find_span(&self, key: &str, value: &str) -> Option<SourceSpan> {
        self.find_spans(key, value).into_iter().next()
    }

    /// Find the spans of every `key: value` pair in the source.
    ///
    /// Empty when an included document also contains the pair, since the
    /// match in the root source may then belong to another node.
    pub fn find_spans(&self, key: &str, value: &str) -> Vec<SourceSpan> {
        let ambiguous = self
            .included
            .iter()
            .any(|src| !find_value_spans(src, key, value).is_empty());
        if ambiguous {
            return Vec::new();
        }
        find_value_spans(self.source.src(), key, value)
    }
}

/// Find the spans of `value` wherever it appears as `key: value` in YAML
/// source, plain or quoted.
///
/// Only whole keys and whole values match, so looking for `name: f` does not
/// point at `name: foo` or `rename: f`.
pub(crate) fn find_value_spans(src: &str, key: &str, value: &str) -> Vec<SourceSpan> {
    if value.is_empty() {
        return Vec::new();
    }

    let mut spans = Vec::new();
    for quote in ["", "\"", "'"] {
        let pattern = format!("{key}: {quote}{value}{quote}");
        let skip = key.len() + 2 + quote.len();

        for (pos, _) in src.match_indices(&pattern) {
            let before = src[..pos].chars().next_back();
            let after = src[pos + pattern.len()..].chars().next();

            let key_starts =
                before.is_none_or(|c| !(c.is_alphanumeric() || c == '_' || c == '-'));
            let value_ends = !quote.is_empty()
                || after.is_none_or(|c| matches!(c, '\n' | '\r' | ',' | '}' | ' ' | '#'));

            if key_starts && value_ends {
                spans.push(SourceSpan::from((pos + skip, value.len())));
            }
        }
    }
    spans.sort_by_key(|span| span.offset());
    spans
}

/// Check that a slug can be used as a single directory name.
///
/// Returns None if valid, Some(reason) if invalid.
pub fn validate_slug(slug: &str) -> Option<&'static str> {
    if slug.is_empty() {
        return Some("slug cannot be empty");
    }
    if slug == "." || slug == ".." {
        return Some("slug cannot be '.' or '..'");
    }
    if slug.contains(['/', '\\']) {
        return Some("slug cannot contain path separators");
    }
    if slug.contains('\0') {
        return Some("slug cannot contain NUL characters");
    }
    None
}

/// Check that no two table items generate into the same directory.
///
/// Tables on a page and tables inside that page's entity bodies all write
/// their children next to each other, so their slugs must be unique together.
pub(super) fn validate_directories(root: &Node, ctx: &ParseContext) -> Result<()> {
    validate_node(root, ctx, "")
}

fn validate_node(node: &Node, ctx: &ParseContext, dir: &str) -> Result<()> {
    match node {
        Node::Page(page) => validate_directory(&page.body, ctx, dir),
        Node::EntityPage(entity) => validate_directory(&entity.body, ctx, dir),
        Node::Raw(_) => Ok(()),
    }
}

fn validate_directory(body: &PageBody, ctx: &ParseContext, dir: &str) -> Result<()> {
    let mut items = Vec::new();
    collect_directory_items(body, &mut items);

    let mut seen = HashSet::new();
    for &item in &items {
        if !seen.insert(item.slug.as_str()) {
            let mut spans = ctx.find_spans("slug", &item.slug);
            spans.extend(ctx.find_spans("name", &item.slug));
            spans.sort_by_key(|span| span.offset());

            let directory = if dir.is_empty() { "." } else { dir };
            return Err(ctx.source_context().duplicate_slug_error(
                &item.slug,
                directory,
                spans.first().copied(),
                spans.get(1).copied(),
            ));
        }
    }

    for item in items {
        let child_dir = if dir.is_empty() {
            item.slug.clone()
        } else {
            format!("{}/{}", dir, item.slug)
        };
        validate_node(&item.node, ctx, &child_dir)?;
    }
    Ok(())
}

fn collect_directory_items<'a>(body: &'a PageBody, items: &mut Vec<&'a TableItem>) {
    items.extend(body.table_items());
    for entity in &body.entities {
        collect_directory_items(&entity.body, items);
    }
}
