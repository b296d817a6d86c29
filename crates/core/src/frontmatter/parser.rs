//! Lenient frontmatter parser.
//!
//! This is deliberately a line-oriented parser, not a YAML parser: vault
//! exports routinely contain headers no strict parser accepts, and a header
//! that cannot be parsed must degrade to "no header" rather than fail the
//! document. The grammar is the small subset Obsidian-style notes use:
//! `key: value` scalars, inline `[a, b, c]` lists, and indented `- item`
//! lists under an empty or block-scalar (`|`, `>`) value.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{FieldValue, Frontmatter, ParsedDocument};

const DELIMITER: &str = "---";

static KEY_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w[\w\s-]*):\s*(.*)$").unwrap());

static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+-\s+(.*)$").unwrap());

/// Parse frontmatter from markdown content.
///
/// Frontmatter is delimited by `---` lines at the very start of the document:
/// ```markdown
/// ---
/// key: value
/// ---
/// # Document content
/// ```
///
/// A document without an opening delimiter, or with an unclosed block,
/// yields an empty header and the full input as body. Lines inside the block
/// that match neither a key nor a list item are ignored. A later duplicate
/// `key:` line overwrites the earlier one.
pub fn parse(raw: &str) -> ParsedDocument {
    let body_only = || ParsedDocument {
        frontmatter: Frontmatter::default(),
        body: raw.to_string(),
    };

    let mut lines = raw.split_inclusive('\n');

    // The opening delimiter must be the first line and must be followed by
    // more content, otherwise there is nothing to close the block.
    let header_start = match lines.next() {
        Some(first) if is_delimiter(first) && first.ends_with('\n') => first.len(),
        _ => return body_only(),
    };

    let mut offset = header_start;
    let mut header_end = None;
    let mut body_start = raw.len();
    for line in lines {
        if is_delimiter(line) {
            header_end = Some(offset);
            body_start = offset + line.len();
            break;
        }
        offset += line.len();
    }

    // No closing delimiter: treat the block as absent.
    let Some(header_end) = header_end else {
        return body_only();
    };

    ParsedDocument {
        frontmatter: parse_block(&raw[header_start..header_end]),
        body: raw[body_start..].to_string(),
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim() == DELIMITER
}

/// Parse the lines between the delimiters.
fn parse_block(block: &str) -> Frontmatter {
    let mut fm = Frontmatter::default();
    let mut current_key: Option<String> = None;
    let mut pending_items: Vec<String> = Vec::new();

    for line in block.lines() {
        if line.trim().is_empty() {
            continue;
        }

        if let Some(cap) = LIST_ITEM_RE.captures(line) {
            pending_items.push(strip_quotes(cap[1].trim()).to_string());
            continue;
        }

        if let Some(cap) = KEY_LINE_RE.captures(line) {
            // A new key flushes accumulated items to the previous key, so
            // malformed input cannot leak items across keys.
            flush_pending(&mut fm, &current_key, &mut pending_items);

            let key = cap[1].trim().to_string();
            let value = strip_quotes(cap[2].trim());

            if value.len() >= 2 && value.starts_with('[') && value.ends_with(']') {
                let items = value[1..value.len() - 1]
                    .split(',')
                    .map(|v| strip_quotes(v.trim()).trim().to_string())
                    .filter(|v| !v.is_empty())
                    .collect();
                fm.fields.insert(key.clone(), FieldValue::List(items));
            } else if !value.is_empty() && value != "|" && value != ">" {
                fm.fields.insert(key.clone(), FieldValue::Scalar(value.to_string()));
            }
            // Empty or block-scalar value: list items may follow on
            // indented lines; the key gets no entry until they do.
            current_key = Some(key);
            continue;
        }

        // Anything else is ignored, not an error.
    }

    flush_pending(&mut fm, &current_key, &mut pending_items);
    fm
}

fn flush_pending(fm: &mut Frontmatter, key: &Option<String>, items: &mut Vec<String>) {
    if items.is_empty() {
        return;
    }
    if let Some(key) = key {
        fm.fields.insert(key.clone(), FieldValue::List(std::mem::take(items)));
    } else {
        // List items before any key have no owner.
        items.clear();
    }
}

/// Strip one surrounding quote character from each end, independently.
fn strip_quotes(s: &str) -> &str {
    let s = s.strip_prefix(|c| c == '"' || c == '\'').unwrap_or(s);
    s.strip_suffix(|c| c == '"' || c == '\'').unwrap_or(s)
}
