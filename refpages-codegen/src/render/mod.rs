//! Rendering of document nodes into page files.
//!
//! Rendering is pure: every call returns its own fragments and the files of
//! the child pages it spawned, and the caller composes them. Nothing touches
//! the filesystem until the collected files are published.

mod blocks;
mod entity;
mod page;
mod table;

use std::path::{Path, PathBuf};

use refpages_core::{File, Scope};
use refpages_manifest::Node;

pub use blocks::{ContentsBlock, NamespaceDirective, SummaryRow, TableHeader, TitleBlock};
pub use entity::{FunctionDeclaration, OverloadDescriptions, ParamList};

use crate::builder::{CodeBuilder, CodeFragment, Renderable};

/// Boilerplate placed at the top of every generated page.
pub const GENERATED_HEADER: &str = "
.. THESE PAGES ARE GENERATED! ANY MODIFICATIONS WILL BE DISCARDED

.. default-domain:: cpp
.. default-role:: cpp:expr
";

/// Options controlling how pages are rendered.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Extension of every generated page file.
    pub extension: String,
    /// Text placed before the rendered lines of every page.
    pub header: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            extension: "rst".to_string(),
            header: GENERATED_HEADER.to_string(),
        }
    }
}

impl RenderOptions {
    /// Use a different page file extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// File name of the page in every directory, e.g. `index.rst`.
    pub fn index_file(&self) -> String {
        format!("index.{}", self.extension)
    }
}

/// Fragments of a page section plus the files of the child pages it spawned.
#[derive(Debug, Default)]
pub(crate) struct Rendered {
    pub fragments: Vec<CodeFragment>,
    pub files: Vec<File>,
}

impl Rendered {
    pub fn push(&mut self, fragment: CodeFragment) {
        self.fragments.push(fragment);
    }

    pub fn blank(&mut self) {
        self.fragments.push(CodeFragment::Blank);
    }

    pub fn emit(&mut self, node: &impl Renderable) {
        self.fragments.extend(node.to_fragments());
    }

    /// Append another section in place.
    pub fn append(&mut self, other: Rendered) {
        self.fragments.extend(other.fragments);
        self.files.extend(other.files);
    }

    /// Append another section as an indented directive body.
    pub fn append_indented(&mut self, other: Rendered) {
        self.fragments.push(CodeFragment::indent(other.fragments));
        self.files.extend(other.files);
    }
}

/// Renders a node tree into one page file per directory.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PageRenderer<'a> {
    options: &'a RenderOptions,
}

impl<'a> PageRenderer<'a> {
    pub fn new(options: &'a RenderOptions) -> Self {
        Self { options }
    }

    /// Render `node` as the page of `dir`.
    ///
    /// Returns the page of `dir` first, then the pages of every descendant
    /// directory in the order their table rows were rendered.
    pub fn render_directory(&self, node: &Node, scope: &Scope, dir: &Path) -> Vec<File> {
        let rendered = self.render_node(node, scope, dir);

        let mut builder = CodeBuilder::rst();
        builder.emit(&rendered.fragments);
        let content = format!("{}\n{}", self.options.header, builder.build());

        let path = dir.join(self.options.index_file());
        tracing::debug!(path = %path.display(), "Rendered page");

        let mut files = Vec::with_capacity(rendered.files.len() + 1);
        files.push(File::new(path, content));
        files.extend(rendered.files);
        files
    }

    fn render_node(&self, node: &Node, scope: &Scope, dir: &Path) -> Rendered {
        match node {
            Node::Page(page) => self.render_page(&page.body, page.ns.as_deref(), scope, dir),
            Node::EntityPage(entity) => self.render_entity_page(entity, scope, dir),
            Node::Raw(text) => Rendered {
                fragments: vec![CodeFragment::text(text)],
                files: Vec::new(),
            },
        }
    }
}

/// Directory of the child page for a table row.
pub(crate) fn child_dir(dir: &Path, slug: &str) -> PathBuf {
    dir.join(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_default() {
        let options = RenderOptions::default();
        assert_eq!(options.index_file(), "index.rst");
        assert!(options.header.contains(".. default-domain:: cpp"));
    }

    #[test]
    fn test_raw_node_page() {
        let options = RenderOptions::default().with_extension("txt");
        let files = PageRenderer::new(&options).render_directory(
            &Node::Raw("Hello\nWorld\n".to_string()),
            &Scope::root(),
            Path::new(""),
        );

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path(), Path::new("index.txt"));
        assert_eq!(
            files[0].content(),
            format!("{GENERATED_HEADER}\nHello\nWorld\n")
        );
    }
}
