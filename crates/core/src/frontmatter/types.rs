//! Frontmatter types and data structures.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single frontmatter value.
///
/// Header values come in two shapes, scalar and list, and the shape is only
/// known at parse time. Consumers must handle both variants explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    /// The scalar value, if this is a scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// The list items, if this is a list.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Scalar(_) => None,
            Self::List(items) => Some(items),
        }
    }
}

/// Parsed header block of a markdown document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Fields as key-value pairs. Keys are case-sensitive as written.
    #[serde(flatten)]
    pub fields: HashMap<String, FieldValue>,
}

impl Frontmatter {
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Look up the first present key from a list of synonymous names.
    pub fn get_any(&self, keys: &[&str]) -> Option<&FieldValue> {
        keys.iter().find_map(|k| self.fields.get(*k))
    }

    /// Scalar value for `key`, if present and scalar.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(FieldValue::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Result of splitting frontmatter from markdown.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Parsed header fields (empty when the document has no header block).
    pub frontmatter: Frontmatter,
    /// The markdown body (everything after the closing delimiter).
    pub body: String,
}
