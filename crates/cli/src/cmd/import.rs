//! Import command implementation.

use std::io::Write;

use noteport_core::config::ResolvedConfig;
use noteport_core::source::collect_markdown_files;
use noteport_core::store::{DuplicateStrategy, NoteStore};
use noteport_core::{resolve_links, BatchImporter, ImportControl, ProgressCallback, SystemEnv};

use super::output::print_stats;
use crate::ImportArgs;

/// Run the import command: scan, parse, resolve, and commit to the store.
pub fn run(rc: &ResolvedConfig, args: ImportArgs) {
    let strategy = match DuplicateStrategy::parse_str(&args.duplicates) {
        Some(s) => s,
        None => {
            eprintln!("Unknown duplicate strategy: {}", args.duplicates);
            eprintln!("Expected one of: skip, replace, rename");
            std::process::exit(1);
        }
    };

    let store_path = args.store.clone().unwrap_or_else(|| rc.store_path.clone());

    let files = match collect_markdown_files(&args.dir, &rc.excluded_folders) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error scanning directory: {}", e);
            std::process::exit(1);
        }
    };

    println!("Importing vault: {}", args.dir.display());

    let progress: Option<ProgressCallback> = if args.verbose {
        Some(Box::new(|current, total, name| {
            println!("[{}/{}] {}", current, total, name);
            ImportControl::Continue
        }))
    } else {
        Some(Box::new(|current, total, _name| {
            if current % 50 == 0 || current == total {
                print!("\rImporting... {}/{}", current, total);
                std::io::stdout().flush().ok();
            }
            ImportControl::Continue
        }))
    };

    let outcome = BatchImporter::new().import(&files, progress);
    if !args.verbose {
        println!();
    }

    let links = resolve_links(&outcome.notes);

    let mut store = match NoteStore::load(&store_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error loading store: {}", e);
            std::process::exit(1);
        }
    };

    let mut env = SystemEnv;
    let commit = store.commit(&outcome.notes, &links, strategy, &mut env);

    if let Some(parent) = store_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating store directory: {}", e);
            std::process::exit(1);
        }
    }
    if let Err(e) = store.save(&store_path) {
        eprintln!("Error saving store: {}", e);
        std::process::exit(1);
    }

    print_stats(&outcome.stats);
    println!();
    println!("Commit:");
    println!("  Imported:      {}", commit.imported);
    println!("  Replaced:      {}", commit.replaced);
    println!("  Skipped:       {}", commit.skipped);
    println!();
    println!("Store saved at: {}", store_path.display());
}
