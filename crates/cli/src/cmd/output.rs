//! Shared output formatting for scan and import.

use noteport_core::{ImportStats, ParsedNote};
use tabled::{settings::Style, Table, Tabled};

/// Row for the scan table.
#[derive(Tabled)]
struct NoteRow {
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Type")]
    note_type: String,
    #[tabled(rename = "Tags")]
    tags: String,
    #[tabled(rename = "Links")]
    links: usize,
}

impl From<&ParsedNote> for NoteRow {
    fn from(note: &ParsedNote) -> Self {
        Self {
            path: note.path.clone(),
            title: note.title.clone(),
            note_type: note.note_type.as_str().to_string(),
            tags: note.tags.join(", "),
            links: note.links.len(),
        }
    }
}

pub fn print_notes_table(notes: &[&ParsedNote]) {
    if notes.is_empty() {
        println!("(no notes found)");
        return;
    }

    let rows: Vec<NoteRow> = notes.iter().map(|n| NoteRow::from(*n)).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn print_notes_json(notes: &[&ParsedNote]) {
    println!("{}", serde_json::to_string_pretty(notes).unwrap_or_default());
}

pub fn print_stats(stats: &ImportStats) {
    println!();
    println!("Scan complete:");
    println!("  Files found:   {}", stats.total);
    println!("  Notes parsed:  {}", stats.parsed);
    println!("  With tags:     {}", stats.with_tags);
    println!("  With links:    {}", stats.with_links);
    println!("  Folders:       {}", stats.folders);
    if !stats.failed.is_empty() {
        println!("  Failed:        {}", stats.failed.len());
        for name in &stats.failed {
            println!("    {}", name);
        }
    }
}
