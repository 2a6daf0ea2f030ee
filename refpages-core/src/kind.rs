//! Kinds of documented entities.

use std::str::FromStr;

/// The kind of an API entity, as written in the `kind` field of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Struct,
    Class,
    Type,
    Fn,
    Ctor,
    Const,
    Var,
    Concept,
}

impl EntityKind {
    /// All kinds, in the order they are listed in error messages.
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Struct,
        EntityKind::Class,
        EntityKind::Type,
        EntityKind::Fn,
        EntityKind::Ctor,
        EntityKind::Const,
        EntityKind::Var,
        EntityKind::Concept,
    ];

    /// Get the document spelling of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Struct => "struct",
            EntityKind::Class => "class",
            EntityKind::Type => "type",
            EntityKind::Fn => "fn",
            EntityKind::Ctor => "ctor",
            EntityKind::Const => "const",
            EntityKind::Var => "var",
            EntityKind::Concept => "concept",
        }
    }

    /// Human-readable label used in page titles.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Struct => "Struct",
            EntityKind::Class => "Class",
            EntityKind::Type => "Type Alias",
            EntityKind::Fn => "Function",
            EntityKind::Ctor => "Constructor",
            EntityKind::Const => "Constant",
            EntityKind::Var => "Variable",
            EntityKind::Concept => "Concept",
        }
    }

    /// Label for an entity that may carry a template-parameter list.
    ///
    /// Concepts are always templates, so they never get the suffix.
    pub fn label_for(&self, templated: bool) -> String {
        if templated && *self != EntityKind::Concept {
            format!("{} Template", self.label())
        } else {
            self.label().to_string()
        }
    }

    /// Whether entities of this kind are documented by signatures.
    pub fn is_callable(&self) -> bool {
        matches!(self, EntityKind::Fn | EntityKind::Ctor)
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Error returned when parsing an unrecognized entity kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity kind '{0}'")]
pub struct UnknownKind(pub String);
