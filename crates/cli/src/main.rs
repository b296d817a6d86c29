mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use noteport_core::config::ConfigLoader;

#[derive(Debug, Parser)]
#[command(name = "npt", version, about = "Import Obsidian-style markdown vaults")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse a vault and report what would be imported, without committing
    Scan(ScanArgs),

    /// Parse a single markdown file and show the extracted note
    Inspect(InspectArgs),

    /// Import a vault into the note store
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Vault directory to scan
    pub dir: PathBuf,

    /// Only show notes of this type (fleeting, literature, permanent, moc)
    #[arg(long = "type")]
    pub note_type: Option<String>,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Print every file as it is processed
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Markdown file to inspect
    pub file: PathBuf,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Vault directory to import
    pub dir: PathBuf,

    /// Store file to commit into (overrides the configured path)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Duplicate handling: skip, replace, or rename
    #[arg(long, default_value = "skip")]
    pub duplicates: String,

    /// Print every file as it is processed
    #[arg(long)]
    pub verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let rc = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    logging::init(&rc);

    match cli.command {
        Commands::Scan(args) => cmd::scan::run(&rc, args),
        Commands::Inspect(args) => cmd::inspect::run(args),
        Commands::Import(args) => cmd::import::run(&rc, args),
    }
}
