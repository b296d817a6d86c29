//! Single-document parsing: frontmatter, extraction, and classification
//! composed into a [`ParsedNote`].

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use serde::Serialize;
use uuid::Uuid;

use crate::classify::{self, NoteType};
use crate::extract::{extract_inline_tags, extract_wiki_links};
use crate::frontmatter::{self, FieldValue, Frontmatter};

/// Sources of parse-time non-determinism: the clock and the identifier
/// generator. Injected so tests can pin both.
pub trait ParseEnv {
    fn now(&self) -> DateTime<Utc>;
    fn next_id(&mut self) -> Uuid;
}

/// Production environment: wall clock and random v4 ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl ParseEnv for SystemEnv {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn next_id(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// A fully parsed note, held in memory for review and link resolution.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedNote {
    /// Unique for the lifetime of the import run; becomes the permanent
    /// note id at commit time.
    pub id: Uuid,
    pub filename: String,
    /// `/`-separated path as selected; equals the filename for flat selections.
    pub path: String,
    /// All path segments except the last ("" for top-level files).
    pub folder_path: String,
    /// Never empty: header title, first heading, filename stem, or "Untitled".
    pub title: String,
    /// Body text with the header block stripped.
    pub content: String,
    /// Original unmodified text, kept for preview and diagnostics.
    pub raw_content: String,
    /// Lowercased union of header tags and inline tags, no duplicates.
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub note_type: NoteType,
    /// Wiki-link targets as written, before resolution.
    pub links: Vec<String>,
    pub frontmatter: Frontmatter,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

static H1_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").unwrap());

/// Parse one raw document into a [`ParsedNote`].
///
/// Pure in everything except id assignment and the "now" fallback for
/// missing or unparseable dates, both of which come from `env`.
pub fn parse_note(
    filename: &str,
    path: &str,
    raw: &str,
    env: &mut dyn ParseEnv,
) -> ParsedNote {
    let parsed = frontmatter::parse(raw);
    let body = parsed.body;
    let fm = parsed.frontmatter;

    let title = resolve_title(&fm, &body, filename);
    let tags = gather_tags(&fm, &body);
    let links = extract_wiki_links(&body);
    let note_type = classify::detect(&fm, &tags, &body);

    let now = env.now();
    let created_at = date_field(&fm, &["created", "date", "createdAt"]).unwrap_or(now);
    let updated_at = date_field(&fm, &["updated", "modified", "updatedAt"]).unwrap_or(now);

    ParsedNote {
        id: env.next_id(),
        filename: filename.to_string(),
        path: path.to_string(),
        folder_path: folder_path(path),
        title,
        content: body,
        raw_content: raw.to_string(),
        tags,
        note_type,
        links,
        frontmatter: fm,
        created_at,
        updated_at,
    }
}

/// Filename with a trailing `.md` stripped (case-insensitive).
pub fn markdown_stem(filename: &str) -> &str {
    let len = filename.len();
    if len > 3 {
        // `get` rejects a split inside a multibyte character.
        if let Some(ext) = filename.get(len - 3..) {
            if ext.eq_ignore_ascii_case(".md") {
                return &filename[..len - 3];
            }
        }
    }
    filename
}

/// Title fallback chain: header `title`/`name`, first `# ` heading,
/// filename stem, literal "Untitled".
fn resolve_title(fm: &Frontmatter, body: &str, filename: &str) -> String {
    if let Some(title) = fm.get_any(&["title", "name"]).and_then(FieldValue::as_str) {
        let title = title.trim();
        if !title.is_empty() {
            return title.to_string();
        }
    }

    if let Some(cap) = H1_RE.captures(body) {
        let heading = cap[1].trim();
        if !heading.is_empty() {
            return heading.to_string();
        }
    }

    let stem = markdown_stem(filename).trim();
    if stem.is_empty() { "Untitled".to_string() } else { stem.to_string() }
}

/// Union of header-declared and inline tags, lowercased, marker stripped,
/// deduplicated case-insensitively in first-seen order.
fn gather_tags(fm: &Frontmatter, body: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    match fm.get("tags") {
        Some(FieldValue::List(items)) => {
            for item in items {
                push_tag(&mut tags, item);
            }
        }
        Some(FieldValue::Scalar(s)) => {
            // A scalar tags field is a comma or whitespace separated list.
            for part in s.split(|c: char| c == ',' || c.is_whitespace()) {
                push_tag(&mut tags, part);
            }
        }
        None => {}
    }

    for tag in extract_inline_tags(body) {
        push_tag(&mut tags, &tag);
    }

    tags
}

fn push_tag(tags: &mut Vec<String>, raw: &str) {
    let tag = raw.trim().trim_start_matches('#').trim().to_lowercase();
    if !tag.is_empty() && !tags.iter().any(|t| *t == tag) {
        tags.push(tag);
    }
}

fn date_field(fm: &Frontmatter, keys: &[&str]) -> Option<DateTime<Utc>> {
    let value = fm.get_any(keys)?;
    let s = match value {
        FieldValue::Scalar(s) => s.as_str(),
        FieldValue::List(items) => items.first()?.as_str(),
    };
    parse_date(s)
}

/// Parse a header date value: RFC 3339 plus the date and datetime forms
/// commonly found in vault headers. Returns `None` on anything else.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&ndt));
        }
    }
    if let Ok(nd) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&nd.and_hms_opt(0, 0, 0)?));
    }
    None
}

fn folder_path(path: &str) -> String {
    match path.rsplit_once('/') {
        Some((folder, _)) => folder.to_string(),
        None => String::new(),
    }
}
