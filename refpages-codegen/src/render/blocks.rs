//! Fixed-shape blocks shared by page and entity rendering.

use refpages_core::{Scope, csv_escape, escape_angle_brackets, title_rule};

use crate::builder::{CodeFragment, Renderable};

/// A page title between two `#` rules, followed by a blank line.
#[derive(Debug, Clone)]
pub struct TitleBlock<'a> {
    title: &'a str,
}

impl<'a> TitleBlock<'a> {
    pub fn new(title: &'a str) -> Self {
        Self { title }
    }
}

impl Renderable for TitleBlock<'_> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let rule = title_rule(self.title);
        vec![
            CodeFragment::line(rule.clone()),
            CodeFragment::line(self.title),
            CodeFragment::line(rule),
            CodeFragment::Blank,
        ]
    }
}

/// The `.. namespace::` directive of a scope, followed by a blank line.
///
/// Renders nothing for a scope without a namespace.
#[derive(Debug, Clone)]
pub struct NamespaceDirective<'a> {
    scope: &'a Scope,
}

impl<'a> NamespaceDirective<'a> {
    pub fn new(scope: &'a Scope) -> Self {
        Self { scope }
    }
}

impl Renderable for NamespaceDirective<'_> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        match self.scope.directive() {
            Some(directive) => vec![CodeFragment::line(directive), CodeFragment::Blank],
            None => Vec::new(),
        }
    }
}

/// The `.. csv-table::` directive opening a summary table.
#[derive(Debug, Clone)]
pub struct TableHeader<'a> {
    header: &'a str,
}

impl<'a> TableHeader<'a> {
    pub fn new(header: &'a str) -> Self {
        Self { header }
    }
}

impl Renderable for TableHeader<'_> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![
            CodeFragment::line(".. csv-table::"),
            CodeFragment::indent(vec![CodeFragment::indent(vec![
                CodeFragment::line(format!(":header: {}", self.header)),
                CodeFragment::line(":class: summary-table mono-links"),
            ])]),
            CodeFragment::Blank,
        ]
    }
}

/// One summary table row linking to a child page.
#[derive(Debug, Clone)]
pub struct SummaryRow<'a> {
    name: &'a str,
    link: &'a str,
    desc: &'a str,
}

impl<'a> SummaryRow<'a> {
    pub fn new(name: &'a str, link: &'a str, desc: &'a str) -> Self {
        Self { name, link, desc }
    }

    /// The quoted cells of this row, without indentation.
    pub fn cells(&self) -> String {
        let doc_ref = format!(":doc:`{} <{}>`", escape_angle_brackets(self.name), self.link);
        format!("\"{}\", \"{}\"", csv_escape(&doc_ref), csv_escape(self.desc))
    }
}

impl Renderable for SummaryRow<'_> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::indent(vec![CodeFragment::indent(vec![
            CodeFragment::line(self.cells()),
        ])])]
    }
}

/// The trailing table of contents listing a page's child pages.
#[derive(Debug, Clone)]
pub struct ContentsBlock<'a> {
    links: &'a [String],
}

impl<'a> ContentsBlock<'a> {
    pub fn new(links: &'a [String]) -> Self {
        Self { links }
    }
}

impl Renderable for ContentsBlock<'_> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        if self.links.is_empty() {
            return Vec::new();
        }
        vec![
            CodeFragment::line(".. rubric:: Contents:"),
            CodeFragment::line(".. toctree::"),
            CodeFragment::Blank,
            CodeFragment::indent(self.links.iter().map(CodeFragment::line).collect()),
        ]
    }
}
