//! noteport-core: import Obsidian-style markdown vaults into a note store.
//!
//! The pipeline runs in stages: select files ([`source`]), parse each
//! document ([`frontmatter`], [`extract`], [`classify`], [`note`]),
//! orchestrate the batch ([`import`]), resolve wiki-links to note ids
//! ([`resolve`]), and commit into the persistent store ([`store`]).

pub mod classify;
pub mod config;
pub mod extract;
pub mod frontmatter;
pub mod import;
pub mod note;
pub mod resolve;
pub mod source;
pub mod store;

#[cfg(test)]
mod testutil;

pub use classify::NoteType;
pub use import::{
    BatchImporter, DocumentSource, ImportControl, ImportOutcome, ImportStats,
    ProgressCallback, RawDocument, SourceError,
};
pub use note::{parse_note, ParseEnv, ParsedNote, SystemEnv};
pub use resolve::{resolve_links, ResolvedLinks};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
