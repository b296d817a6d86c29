//! Inspect command implementation.

use noteport_core::{parse_note, SystemEnv};

use crate::InspectArgs;

/// Run the inspect command on a single file.
pub fn run(args: InspectArgs) {
    let raw = match std::fs::read_to_string(&args.file) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Error reading {}: {}", args.file.display(), e);
            std::process::exit(1);
        }
    };

    let filename = args
        .file
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut env = SystemEnv;
    let note = parse_note(&filename, &filename, &raw, &mut env);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&note).unwrap_or_default());
        return;
    }

    println!("Title:    {}", note.title);
    println!("Type:     {}", note.note_type.as_str());
    println!("Tags:     {}", if note.tags.is_empty() { "(none)".to_string() } else { note.tags.join(", ") });
    println!("Created:  {}", note.created_at.format("%Y-%m-%d %H:%M"));
    println!("Updated:  {}", note.updated_at.format("%Y-%m-%d %H:%M"));
    if note.links.is_empty() {
        println!("Links:    (none)");
    } else {
        println!("Links:");
        for target in &note.links {
            println!("  [[{}]]", target);
        }
    }
    if !note.frontmatter.is_empty() {
        println!("Header fields:");
        let mut keys: Vec<_> = note.frontmatter.fields.keys().collect();
        keys.sort();
        for key in keys {
            println!("  {}", key);
        }
    }
}
