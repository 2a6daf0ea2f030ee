//! Loading and validation of refpages reference documents.
//!
//! A reference document is YAML describing a tree of pages. [`Document`]
//! parses it into a closed node model, resolving `!include` tags and
//! rejecting anything the generator could not turn into a valid tree.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod document;
mod error;

pub use config::{CONFIG_FILE, Config, InputConfig, OutputConfig};
pub use document::*;
pub use error::{Error, Result, SourceContext};
