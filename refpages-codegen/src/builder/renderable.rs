//! Renderable trait and CodeFragment for decoupled page generation.
//!
//! This module provides abstractions that allow page sections to be composed
//! and rendered without direct coupling to CodeBuilder.

use refpages_core::split_lines;

/// Represents a fragment of a generated page.
///
/// CodeFragments form an intermediate representation between the document
/// model and the final text, enabling composition and nesting.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    /// A single line (will have newline appended).
    Line(String),
    /// A blank line.
    Blank,
    /// Indent the contained fragments one level.
    Indent(Vec<CodeFragment>),
    /// A sequence of fragments.
    Sequence(Vec<CodeFragment>),
}

impl CodeFragment {
    /// Create a line fragment.
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    /// Create an indented fragment sequence.
    pub fn indent(fragments: Vec<CodeFragment>) -> Self {
        Self::Indent(fragments)
    }

    /// Split free text into one line fragment per line.
    ///
    /// Empty lines become [`CodeFragment::Blank`] so they are never indented.
    pub fn text(s: &str) -> Self {
        Self::Sequence(
            split_lines(s)
                .into_iter()
                .map(|line| {
                    if line.is_empty() {
                        Self::Blank
                    } else {
                        Self::Line(line.to_string())
                    }
                })
                .collect(),
        )
    }
}

/// Trait for types that can be rendered to page fragments.
///
/// Implement this trait for page sections to enable them to be rendered
/// through CodeBuilder without direct coupling.
pub trait Renderable {
    /// Convert this node to a sequence of fragments.
    fn to_fragments(&self) -> Vec<CodeFragment>;
}

/// Blanket implementation for references.
impl<T: Renderable + ?Sized> Renderable for &T {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        (*self).to_fragments()
    }
}

impl Renderable for Vec<CodeFragment> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.clone()
    }
}
