//! Frontmatter parsing from markdown documents.
//!
//! This module provides functionality to:
//! - Split an optional header block from the document body
//! - Parse the block's key-value and list lines into a [`Frontmatter`]

pub mod parser;
pub mod types;

pub use parser::parse;
pub use types::{FieldValue, Frontmatter, ParsedDocument};
