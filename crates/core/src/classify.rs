//! Note type classification heuristics.
//!
//! Classification is a cheap, deterministic cascade: explicit header hints
//! win, then tag synonyms, then a structural guess based on how link-heavy
//! the body is. Anything ambiguous lands in the least committal category.

use serde::{Deserialize, Serialize};

use crate::extract::extract_wiki_links;
use crate::frontmatter::{FieldValue, Frontmatter};

/// Outgoing wiki-link count at which an otherwise untyped note is assumed
/// to be a map-of-content hub.
pub const MOC_LINK_THRESHOLD: usize = 6;

/// Note category in the Zettelkasten sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    /// Quick unprocessed capture awaiting triage.
    #[default]
    Fleeting,
    /// Notes on an external source (book, article, reference).
    Literature,
    /// Evergreen knowledge notes.
    Permanent,
    /// Map-of-content: an index note with many outgoing links.
    Moc,
}

impl NoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fleeting => "fleeting",
            Self::Literature => "literature",
            Self::Permanent => "permanent",
            Self::Moc => "moc",
        }
    }

    /// Parse a note type name (case-insensitive).
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fleeting" => Some(Self::Fleeting),
            "literature" => Some(Self::Literature),
            "permanent" => Some(Self::Permanent),
            "moc" => Some(Self::Moc),
            _ => None,
        }
    }
}

const MOC_TAGS: &[&str] = &["moc", "map-of-content", "index"];
const LITERATURE_TAGS: &[&str] = &["literature", "reference", "source", "book"];
const PERMANENT_TAGS: &[&str] = &["permanent", "evergreen", "atomic"];
const FLEETING_TAGS: &[&str] = &["fleeting", "inbox", "scratch", "todo"];

/// Classify a note. First match wins: header `type`/`note-type` hints,
/// then tag synonyms, then the link-count heuristic, then [`NoteType::Fleeting`].
pub fn detect(frontmatter: &Frontmatter, tags: &[String], body: &str) -> NoteType {
    let hint = frontmatter
        .get_any(&["type", "note-type"])
        .and_then(|v| match v {
            FieldValue::Scalar(s) => Some(s.as_str()),
            // A list-valued hint still carries a usable first element.
            FieldValue::List(items) => items.first().map(String::as_str),
        })
        .map(str::to_lowercase)
        .unwrap_or_default();

    if !hint.is_empty() {
        if hint.contains("moc") || hint.contains("map") {
            return NoteType::Moc;
        }
        if ["lit", "source", "reference"].iter().any(|k| hint.contains(k)) {
            return NoteType::Literature;
        }
        if ["perm", "evergreen", "atomic"].iter().any(|k| hint.contains(k)) {
            return NoteType::Permanent;
        }
        if ["fleet", "inbox", "scratch"].iter().any(|k| hint.contains(k)) {
            return NoteType::Fleeting;
        }
    }

    let lowered: Vec<String> = tags.iter().map(|t| t.to_lowercase()).collect();
    let has_any = |set: &[&str]| lowered.iter().any(|t| set.contains(&t.as_str()));
    if has_any(MOC_TAGS) {
        return NoteType::Moc;
    }
    if has_any(LITERATURE_TAGS) {
        return NoteType::Literature;
    }
    if has_any(PERMANENT_TAGS) {
        return NoteType::Permanent;
    }
    if has_any(FLEETING_TAGS) {
        return NoteType::Fleeting;
    }

    // Many outgoing links and no explicit signal: treat as a hub.
    if extract_wiki_links(body).len() >= MOC_LINK_THRESHOLD {
        return NoteType::Moc;
    }

    NoteType::Fleeting
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn fm(key: &str, value: &str) -> Frontmatter {
        let mut fm = Frontmatter::default();
        fm.fields.insert(key.to_string(), FieldValue::Scalar(value.to_string()));
        fm
    }

    #[rstest]
    #[case("moc", NoteType::Moc)]
    #[case("Map of Content", NoteType::Moc)]
    #[case("literature-note", NoteType::Literature)]
    #[case("source", NoteType::Literature)]
    #[case("Reference", NoteType::Literature)]
    #[case("Permanent", NoteType::Permanent)]
    #[case("evergreen", NoteType::Permanent)]
    #[case("atomic", NoteType::Permanent)]
    #[case("fleeting", NoteType::Fleeting)]
    #[case("inbox", NoteType::Fleeting)]
    #[case("scratch-pad", NoteType::Fleeting)]
    fn header_hint_wins(#[case] hint: &str, #[case] expected: NoteType) {
        assert_eq!(detect(&fm("type", hint), &[], ""), expected);
    }

    #[test]
    fn note_type_key_variant_accepted() {
        assert_eq!(detect(&fm("note-type", "moc"), &[], ""), NoteType::Moc);
    }

    #[test]
    fn list_valued_hint_uses_first_element() {
        let mut f = Frontmatter::default();
        f.fields.insert(
            "type".to_string(),
            FieldValue::List(vec!["moc".to_string(), "other".to_string()]),
        );
        assert_eq!(detect(&f, &[], ""), NoteType::Moc);
    }

    #[test]
    fn empty_list_hint_falls_through() {
        let mut f = Frontmatter::default();
        f.fields.insert("type".to_string(), FieldValue::List(Vec::new()));
        let tags = vec!["book".to_string()];
        assert_eq!(detect(&f, &tags, ""), NoteType::Literature);
    }

    #[test]
    fn header_hint_ignores_body_content() {
        // A permanent note stays permanent no matter how link-heavy it is.
        let body = "[[a]] [[b]] [[c]] [[d]] [[e]] [[f]] [[g]]";
        assert_eq!(detect(&fm("type", "Permanent"), &[], body), NoteType::Permanent);
    }

    #[rstest]
    #[case("map-of-content", NoteType::Moc)]
    #[case("INDEX", NoteType::Moc)]
    #[case("book", NoteType::Literature)]
    #[case("evergreen", NoteType::Permanent)]
    #[case("todo", NoteType::Fleeting)]
    fn tag_synonyms(#[case] tag: &str, #[case] expected: NoteType) {
        let tags = vec![tag.to_string()];
        assert_eq!(detect(&Frontmatter::default(), &tags, ""), expected);
    }

    #[test]
    fn unknown_hint_falls_through_to_tags() {
        let tags = vec!["book".to_string()];
        assert_eq!(detect(&fm("type", "whatever"), &tags, ""), NoteType::Literature);
    }

    #[test]
    fn link_count_boundary_at_threshold() {
        let five = "[[a]] [[b]] [[c]] [[d]] [[e]]";
        let six = "[[a]] [[b]] [[c]] [[d]] [[e]] [[f]]";
        let seven = "[[a]] [[b]] [[c]] [[d]] [[e]] [[f]] [[g]]";
        assert_eq!(detect(&Frontmatter::default(), &[], five), NoteType::Fleeting);
        assert_eq!(detect(&Frontmatter::default(), &[], six), NoteType::Moc);
        assert_eq!(detect(&Frontmatter::default(), &[], seven), NoteType::Moc);
    }

    #[test]
    fn duplicate_links_count_once() {
        let body = "[[a]] [[a]] [[a]] [[a]] [[a]] [[a]] [[a]]";
        assert_eq!(detect(&Frontmatter::default(), &[], body), NoteType::Fleeting);
    }

    #[test]
    fn default_is_fleeting() {
        assert_eq!(detect(&Frontmatter::default(), &[], "plain text"), NoteType::Fleeting);
    }
}
