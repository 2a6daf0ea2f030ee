//! Page generation building blocks.
//!
//! This module provides the core primitives for generating pages:
//! - [`CodeBuilder`] - Fluent API for building indented text
//! - [`CodeFragment`] - Intermediate representation for page pieces
//! - [`Renderable`] - Trait for types that can be converted to fragments
//! - [`Indent`] - Indentation configuration

mod code_builder;
mod indent;
mod renderable;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
pub use renderable::{CodeFragment, Renderable};
