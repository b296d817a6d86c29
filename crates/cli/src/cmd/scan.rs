//! Scan command implementation.

use noteport_core::config::ResolvedConfig;
use noteport_core::source::collect_markdown_files;
use noteport_core::{BatchImporter, ImportControl, NoteType, ProgressCallback};

use super::output::{print_notes_json, print_notes_table, print_stats};
use crate::ScanArgs;

/// Run the scan command: a dry run of the import pipeline.
pub fn run(rc: &ResolvedConfig, args: ScanArgs) {
    let type_filter = match args.note_type.as_deref() {
        Some(s) => match NoteType::parse_str(s) {
            Some(t) => Some(t),
            None => {
                eprintln!("Unknown note type: {}", s);
                eprintln!("Expected one of: fleeting, literature, permanent, moc");
                std::process::exit(1);
            }
        },
        None => None,
    };

    let files = match collect_markdown_files(&args.dir, &rc.excluded_folders) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error scanning directory: {}", e);
            std::process::exit(1);
        }
    };

    let progress: Option<ProgressCallback> = if args.verbose && !args.json {
        Some(Box::new(|current, total, name| {
            println!("[{}/{}] {}", current, total, name);
            ImportControl::Continue
        }))
    } else {
        None
    };

    let outcome = BatchImporter::new().import(&files, progress);

    let selected: Vec<_> = outcome
        .notes
        .iter()
        .filter(|n| type_filter.map_or(true, |t| n.note_type == t))
        .collect();

    if args.json {
        print_notes_json(&selected);
    } else {
        print_notes_table(&selected);
        print_stats(&outcome.stats);
    }
}
