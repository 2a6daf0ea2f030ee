//! Core types for the refpages reference generator.
//!
//! This crate provides the fundamental values shared by the document loader
//! and the page renderers: the scope a declaration lives in, the entity kinds
//! and their labels, generated page files and text helpers.

mod file;
mod kind;
mod scope;
mod utils;

// File operations
pub use file::File;
// Fundamental types
pub use kind::{EntityKind, UnknownKind};
pub use scope::Scope;
// String utilities
pub use utils::{csv_escape, escape_angle_brackets, split_lines, title_rule};
