//! Persistent note store: the commit side of an import.
//!
//! The pipeline itself never persists anything. The store is the collaborator
//! that owns deduplication against existing notes, folder materialization,
//! and the final note records with store-level defaults.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::classify::NoteType;
use crate::note::{ParseEnv, ParsedNote};
use crate::resolve::ResolvedLinks;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read store file {0}: {1}")]
    Read(String, #[source] std::io::Error),

    #[error("failed to write store file {0}: {1}")]
    Write(String, #[source] std::io::Error),

    #[error("invalid store file {0}: {1}")]
    Decode(String, #[source] serde_json::Error),

    #[error("failed to encode store: {0}")]
    Encode(#[source] serde_json::Error),
}

/// A committed note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub note_type: NoteType,
    pub tags: Vec<String>,
    pub folder_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_favorite: bool,
    pub is_hidden: bool,
    pub linked_note_ids: Vec<Uuid>,
    pub word_count: usize,
}

/// A folder in the store's hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
}

/// How to handle an incoming note whose title matches an existing one
/// (case-insensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateStrategy {
    /// Keep the existing note, drop the incoming one.
    #[default]
    Skip,
    /// Overwrite the existing note's content, tags, and updated time.
    Replace,
    /// Import under a suffixed title.
    Rename,
}

impl DuplicateStrategy {
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "skip" => Some(Self::Skip),
            "replace" => Some(Self::Replace),
            "rename" => Some(Self::Rename),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::Replace => "replace",
            Self::Rename => "rename",
        }
    }
}

/// Counts from one commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitStats {
    pub imported: usize,
    pub replaced: usize,
    pub skipped: usize,
}

/// The long-lived note store, JSON-backed.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NoteStore {
    pub notes: Vec<Note>,
    pub folders: Vec<Folder>,
}

impl NoteStore {
    /// Load a store from disk. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Read(path.display().to_string(), e))?;
        serde_json::from_str(&raw)
            .map_err(|e| StoreError::Decode(path.display().to_string(), e))
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let encoded = serde_json::to_string_pretty(self).map_err(StoreError::Encode)?;
        std::fs::write(path, encoded)
            .map_err(|e| StoreError::Write(path.display().to_string(), e))
    }

    /// Commit a reviewed batch into the store.
    ///
    /// Resolved link ids come from `links`; folder paths are materialized on
    /// demand, reusing an existing folder with the same name under the same
    /// parent. `env` supplies ids for newly created folders.
    pub fn commit(
        &mut self,
        batch: &[ParsedNote],
        links: &ResolvedLinks,
        strategy: DuplicateStrategy,
        env: &mut dyn ParseEnv,
    ) -> CommitStats {
        let mut existing: HashMap<String, Uuid> =
            self.notes.iter().map(|n| (n.title.to_lowercase(), n.id)).collect();
        let mut stats = CommitStats::default();

        for parsed in batch {
            let mut title = parsed.title.clone();

            if let Some(existing_id) = existing.get(&title.to_lowercase()).copied() {
                match strategy {
                    DuplicateStrategy::Skip => {
                        tracing::debug!("skipping duplicate note: {}", title);
                        stats.skipped += 1;
                        continue;
                    }
                    DuplicateStrategy::Replace => {
                        if let Some(note) =
                            self.notes.iter_mut().find(|n| n.id == existing_id)
                        {
                            note.content = parsed.content.clone();
                            note.tags = parsed.tags.clone();
                            note.updated_at = parsed.updated_at;
                            note.word_count = word_count(&parsed.content);
                        }
                        stats.replaced += 1;
                        continue;
                    }
                    DuplicateStrategy::Rename => {
                        title = format!("{} (imported)", title);
                    }
                }
            }

            let folder_id = self.materialize_folders(&parsed.folder_path, env);
            self.notes.push(Note {
                id: parsed.id,
                title: title.clone(),
                content: parsed.content.clone(),
                note_type: parsed.note_type,
                tags: parsed.tags.clone(),
                folder_id,
                created_at: parsed.created_at,
                updated_at: parsed.updated_at,
                is_favorite: false,
                is_hidden: false,
                linked_note_ids: links.get(&parsed.id).cloned().unwrap_or_default(),
                word_count: word_count(&parsed.content),
            });
            existing.insert(title.to_lowercase(), parsed.id);
            stats.imported += 1;
        }

        stats
    }

    /// Find or create the folder chain for a `/`-separated folder path,
    /// returning the id of the deepest folder.
    fn materialize_folders(
        &mut self,
        folder_path: &str,
        env: &mut dyn ParseEnv,
    ) -> Option<Uuid> {
        let mut parent: Option<Uuid> = None;
        for segment in folder_path.split('/').filter(|s| !s.is_empty()) {
            let found = self
                .folders
                .iter()
                .find(|f| f.parent_id == parent && f.name == segment)
                .map(|f| f.id);
            let id = match found {
                Some(id) => id,
                None => {
                    let id = env.next_id();
                    self.folders.push(Folder {
                        id,
                        name: segment.to_string(),
                        parent_id: parent,
                    });
                    id
                }
            };
            parent = Some(id);
        }
        parent
    }
}

fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}
