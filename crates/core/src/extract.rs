//! Wiki-link and inline tag extraction from note bodies.
//!
//! Kept as standalone pure functions so the matching strategy can change
//! without touching the parser or importer.

use std::sync::LazyLock;

use regex::Regex;

static WIKILINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Matches [[target]], [[target|alias]], [[target#section]];
    // the alias or section suffix is discarded.
    Regex::new(r"\[\[([^\]|#]+)(?:[|#][^\]]*)?\]\]").unwrap()
});

static INLINE_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    // A tag marker preceded by start of text or whitespace, followed by an
    // alphabetic character and then alphanumerics, underscore, slash, hyphen.
    Regex::new(r"(?:^|\s)#([A-Za-z][A-Za-z0-9_/-]*)").unwrap()
});

/// Extract wiki-link targets from body text.
///
/// Targets are trimmed; duplicates collapse to the first occurrence, so the
/// result preserves first-seen order.
pub fn extract_wiki_links(body: &str) -> Vec<String> {
    let mut links: Vec<String> = Vec::new();
    for cap in WIKILINK_RE.captures_iter(body) {
        let target = cap[1].trim();
        if !target.is_empty() && !links.iter().any(|l| l == target) {
            links.push(target.to_string());
        }
    }
    links
}

/// Extract inline `#tags` from body text, order-preserving and deduplicated.
/// The marker character is not part of the returned tag.
pub fn extract_inline_tags(body: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for cap in INLINE_TAG_RE.captures_iter(body) {
        let tag = &cap[1];
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}
