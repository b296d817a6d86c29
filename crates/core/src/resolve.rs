//! Cross-reference resolution across a fully parsed batch.

use std::collections::HashMap;

use uuid::Uuid;

use crate::note::{markdown_stem, ParsedNote};

/// Map from note id to the ids of the notes it references.
pub type ResolvedLinks = HashMap<Uuid, Vec<Uuid>>;

/// Resolve each note's wiki-link targets to note ids within the batch.
///
/// Matching is case-insensitive and exact, against titles and filename
/// stems; no fuzzy matching. Title entries are written after filename
/// entries, so on collision the title wins. Unresolved targets are dropped
/// silently: they may point outside the batch or at notes not yet created.
/// Self-references are excluded. Per note, resolved ids follow the order
/// the targets were extracted in.
pub fn resolve_links(notes: &[ParsedNote]) -> ResolvedLinks {
    let mut lookup: HashMap<String, Uuid> = HashMap::new();
    for note in notes {
        lookup.insert(markdown_stem(&note.filename).to_lowercase(), note.id);
    }
    for note in notes {
        lookup.insert(note.title.to_lowercase(), note.id);
    }

    let mut resolved = ResolvedLinks::new();
    for note in notes {
        let ids: Vec<Uuid> = note
            .links
            .iter()
            .filter_map(|target| lookup.get(&target.to_lowercase()))
            .copied()
            .filter(|id| *id != note.id)
            .collect();
        resolved.insert(note.id, ids);
    }
    resolved
}
