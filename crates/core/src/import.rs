//! Batch import orchestration: many raw documents in, parsed notes plus
//! statistics out.
//!
//! The importer is strictly sequential. One unreadable file never blocks the
//! rest of the batch; it is recorded in the statistics instead. The progress
//! callback runs after every file and can abandon the run between files,
//! in which case already-accumulated notes stay valid.

use std::collections::HashSet;

use thiserror::Error;

use crate::note::{parse_note, ParseEnv, ParsedNote, SystemEnv};

/// Error reading a document from its source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A unit of raw input for the importer.
///
/// Reading is fallible so file-backed sources can surface I/O errors; a
/// failing source is recorded per file, never propagated.
pub trait DocumentSource {
    fn filename(&self) -> &str;

    /// `/`-separated path; equal to the filename for flat selections.
    fn path(&self) -> &str;

    fn read(&self) -> Result<String, SourceError>;
}

/// An in-memory raw document.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub filename: String,
    pub path: String,
    pub content: String,
}

impl RawDocument {
    pub fn new(
        filename: impl Into<String>,
        path: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self { filename: filename.into(), path: path.into(), content: content.into() }
    }
}

impl DocumentSource for RawDocument {
    fn filename(&self) -> &str {
        &self.filename
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn read(&self) -> Result<String, SourceError> {
        Ok(self.content.clone())
    }
}

/// Aggregate statistics over one import batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ImportStats {
    /// Candidate files in the batch.
    pub total: usize,
    /// Successfully parsed documents.
    pub parsed: usize,
    /// Parsed documents with at least one tag.
    pub with_tags: usize,
    /// Parsed documents with at least one wiki-link.
    pub with_links: usize,
    /// Distinct non-empty folder paths.
    pub folders: usize,
    /// Filenames that failed to read, in input order.
    pub failed: Vec<String>,
}

/// Decision returned by the progress callback after each file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportControl {
    Continue,
    Stop,
}

/// Called after each file, success or failure, with
/// `(processed, total, filename)`; `processed` increases monotonically.
pub type ProgressCallback<'a> = Box<dyn FnMut(usize, usize, &str) -> ImportControl + 'a>;

/// Result of an import run. Partial if the progress callback stopped early.
#[derive(Debug)]
pub struct ImportOutcome {
    pub notes: Vec<ParsedNote>,
    pub stats: ImportStats,
}

/// Sequential batch importer.
pub struct BatchImporter<E: ParseEnv = SystemEnv> {
    env: E,
}

impl BatchImporter<SystemEnv> {
    pub fn new() -> Self {
        Self { env: SystemEnv }
    }
}

impl Default for BatchImporter<SystemEnv> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ParseEnv> BatchImporter<E> {
    /// Importer with an injected clock/id environment.
    pub fn with_env(env: E) -> Self {
        Self { env }
    }

    /// Parse every source in order. An empty batch yields all-zero
    /// statistics and is not an error.
    pub fn import<S: DocumentSource>(
        &mut self,
        sources: &[S],
        mut progress: Option<ProgressCallback<'_>>,
    ) -> ImportOutcome {
        let total = sources.len();
        let mut notes = Vec::with_capacity(total);
        let mut stats = ImportStats { total, ..ImportStats::default() };

        for (i, source) in sources.iter().enumerate() {
            match source.read() {
                Ok(text) => {
                    notes.push(parse_note(
                        source.filename(),
                        source.path(),
                        &text,
                        &mut self.env,
                    ));
                    stats.parsed += 1;
                }
                Err(e) => {
                    tracing::warn!("failed to import {}: {}", source.filename(), e);
                    stats.failed.push(source.filename().to_string());
                }
            }

            if let Some(cb) = progress.as_mut() {
                if cb(i + 1, total, source.filename()) == ImportControl::Stop {
                    tracing::debug!(
                        "import abandoned after {} of {} files",
                        i + 1,
                        total
                    );
                    break;
                }
            }
        }

        stats.with_tags = notes.iter().filter(|n| !n.tags.is_empty()).count();
        stats.with_links = notes.iter().filter(|n| !n.links.is_empty()).count();
        stats.folders = notes
            .iter()
            .filter(|n| !n.folder_path.is_empty())
            .map(|n| n.folder_path.as_str())
            .collect::<HashSet<_>>()
            .len();

        ImportOutcome { notes, stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FixedEnv;

    enum TestSource {
        Ok(RawDocument),
        Broken(&'static str),
    }

    impl DocumentSource for TestSource {
        fn filename(&self) -> &str {
            match self {
                Self::Ok(doc) => &doc.filename,
                Self::Broken(name) => name,
            }
        }

        fn path(&self) -> &str {
            self.filename()
        }

        fn read(&self) -> Result<String, SourceError> {
            match self {
                Self::Ok(doc) => doc.read(),
                Self::Broken(name) => Err(SourceError::Read {
                    path: (*name).to_string(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::PermissionDenied,
                        "unreadable",
                    ),
                }),
            }
        }
    }

    fn importer() -> BatchImporter<FixedEnv> {
        BatchImporter::with_env(FixedEnv::new())
    }

    #[test]
    fn failure_does_not_block_the_batch() {
        let sources = vec![
            TestSource::Ok(RawDocument::new("a.md", "a.md", "# A\n#tag")),
            TestSource::Broken("b.md"),
            TestSource::Ok(RawDocument::new("c.md", "c.md", "# C\n[[A]]")),
        ];

        let outcome = importer().import(&sources, None);

        assert_eq!(outcome.stats.total, 3);
        assert_eq!(outcome.stats.parsed, 2);
        assert_eq!(outcome.stats.failed, ["b.md"]);
        assert_eq!(outcome.notes.len(), 2);
        assert_eq!(outcome.notes[0].title, "A");
        assert_eq!(outcome.notes[1].title, "C");
    }

    #[test]
    fn stats_count_tags_links_and_folders() {
        let sources = vec![
            RawDocument::new("a.md", "top/a.md", "#tagged body"),
            RawDocument::new("b.md", "top/b.md", "see [[a]]"),
            RawDocument::new("c.md", "other/deep/c.md", "plain"),
            RawDocument::new("d.md", "d.md", "plain"),
        ];

        let outcome = importer().import(&sources, None);

        assert_eq!(outcome.stats.parsed, 4);
        assert_eq!(outcome.stats.with_tags, 1);
        assert_eq!(outcome.stats.with_links, 1);
        // "top" counted once, "other/deep" once, "" not counted.
        assert_eq!(outcome.stats.folders, 2);
    }

    #[test]
    fn progress_runs_after_every_file_including_failures() {
        let sources = vec![
            TestSource::Ok(RawDocument::new("a.md", "a.md", "x")),
            TestSource::Broken("b.md"),
            TestSource::Ok(RawDocument::new("c.md", "c.md", "y")),
        ];

        let mut seen: Vec<(usize, usize, String)> = Vec::new();
        let progress: ProgressCallback = Box::new(|current, total, name| {
            seen.push((current, total, name.to_string()));
            ImportControl::Continue
        });

        importer().import(&sources, Some(progress));

        assert_eq!(
            seen,
            [
                (1, 3, "a.md".to_string()),
                (2, 3, "b.md".to_string()),
                (3, 3, "c.md".to_string()),
            ]
        );
    }

    #[test]
    fn stop_keeps_partial_results_valid() {
        let sources = vec![
            RawDocument::new("a.md", "a.md", "# A"),
            RawDocument::new("b.md", "b.md", "# B"),
            RawDocument::new("c.md", "c.md", "# C"),
        ];

        let progress: ProgressCallback = Box::new(|current, _, _| {
            if current == 2 { ImportControl::Stop } else { ImportControl::Continue }
        });

        let outcome = importer().import(&sources, Some(progress));

        assert_eq!(outcome.notes.len(), 2);
        assert_eq!(outcome.stats.parsed, 2);
        assert_eq!(outcome.stats.total, 3);
        assert_eq!(outcome.notes[1].title, "B");
    }

    #[test]
    fn empty_batch_yields_zero_stats() {
        let sources: Vec<RawDocument> = Vec::new();
        let outcome = importer().import(&sources, None);

        assert_eq!(outcome.stats, ImportStats::default());
        assert!(outcome.notes.is_empty());
    }
}
