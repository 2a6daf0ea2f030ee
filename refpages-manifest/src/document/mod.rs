//! Reference document model, parsing and validation.
//!
//! The loader reads untyped YAML, resolves `!include` tags and converts the
//! result into the closed node model below. Everything the renderers need to
//! reject is rejected here, so rendering only ever matches exhaustive cases.

mod deserialize;
mod file;
mod include;
mod parse;
mod validate;

use indexmap::IndexMap;
use refpages_core::EntityKind;

pub use file::DocumentFile;
pub use parse::{INDEX_FILE, parse_document};
pub use validate::{ParseContext, validate_slug};

/// A parsed and validated reference document.
#[derive(Debug, Clone)]
pub struct Document {
    /// The root node the output tree is generated from.
    pub root: Node,
}

/// One of the node shapes a page can be generated from.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A generic page (`page:`).
    Page(Page),
    /// A page documenting a single entity (`ent-page:`).
    EntityPage(Entity),
    /// Literal reStructuredText (`rst:`).
    Raw(String),
}

/// A generic page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Namespace every declaration on this page lives in.
    pub ns: Option<String>,
    pub body: PageBody,
}

/// The documentation fields shared by pages and entities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageBody {
    pub title: Option<String>,
    pub intro: Option<String>,
    /// Summary tables, in document order.
    pub contents: Vec<SummaryTable>,
    pub main: Option<String>,
    pub entities: Vec<Entity>,
    pub outro: Option<String>,
}

impl PageBody {
    /// Items of every table on this body, in document order.
    pub fn table_items(&self) -> impl Iterator<Item = &TableItem> {
        self.contents.iter().flat_map(|table| table.items.iter())
    }
}

/// A summary table listing child pages.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTable {
    pub header: String,
    pub items: Vec<TableItem>,
}

/// A row of a summary table, with the page it links to.
#[derive(Debug, Clone, PartialEq)]
pub struct TableItem {
    pub name: String,
    /// Directory name of the child page (defaults to `name`).
    pub slug: String,
    pub desc: String,
    pub node: Node,
}

/// A documented API entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub name: String,
    /// Explicit namespace, replacing the enclosing scope.
    pub ns: Option<String>,
    /// Template-parameter list (e.g. `<typename T>`); concepts keep theirs in
    /// [`Declaration::Concept`].
    pub template: Option<String>,
    pub declaration: Declaration,
    /// The entity's own documentation.
    pub body: PageBody,
}

impl Entity {
    /// The kind this entity was declared with.
    pub fn kind(&self) -> EntityKind {
        self.declaration.kind()
    }

    /// Title label, e.g. `Class Template`.
    pub fn label(&self) -> String {
        self.kind().label_for(self.template.is_some())
    }
}

/// What is declared, with the fields each kind requires.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// `struct` or `class`; its body opens a nested scope.
    Class { kind: ClassKind },
    /// `type`: an alias, optionally `= is`.
    TypeAlias { is: Option<String> },
    /// `const` or `var` of type `ty`, optionally `= is`.
    Variable {
        constant: bool,
        ty: String,
        is: Option<String>,
    },
    /// `concept`, always templated.
    Concept { template: String, is: Option<String> },
    /// `fn` or `ctor` with one or more overloads.
    Function {
        constructor: bool,
        signatures: Vec<Signature>,
        /// Parameter descriptions, in document order.
        params: IndexMap<String, String>,
    },
}

impl Declaration {
    /// Get the entity kind for this declaration.
    pub fn kind(&self) -> EntityKind {
        match self {
            Declaration::Class {
                kind: ClassKind::Struct,
            } => EntityKind::Struct,
            Declaration::Class {
                kind: ClassKind::Class,
            } => EntityKind::Class,
            Declaration::TypeAlias { .. } => EntityKind::Type,
            Declaration::Variable { constant: true, .. } => EntityKind::Const,
            Declaration::Variable {
                constant: false, ..
            } => EntityKind::Var,
            Declaration::Concept { .. } => EntityKind::Concept,
            Declaration::Function {
                constructor: true,
                ..
            } => EntityKind::Ctor,
            Declaration::Function {
                constructor: false,
                ..
            } => EntityKind::Fn,
        }
    }
}

/// Keyword of a class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Struct,
    Class,
}

impl ClassKind {
    /// The directive keyword (`struct` or `class`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassKind::Struct => "struct",
            ClassKind::Class => "class",
        }
    }
}

/// One overload of a function.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub sig: String,
    /// Template-parameter list of this overload.
    pub template: Option<String>,
    /// Description of this overload.
    pub desc: Option<String>,
}

impl Signature {
    /// A plain signature without template or description.
    pub fn plain(sig: impl Into<String>) -> Self {
        Self {
            sig: sig.into(),
            template: None,
            desc: None,
        }
    }
}
