//! Filesystem selection of markdown documents for import.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::import::{DocumentSource, SourceError};

#[derive(Debug, Error)]
pub enum WalkError {
    #[error("import root does not exist: {0}")]
    MissingRoot(String),

    #[error("failed to walk directory {0}: {1}")]
    Walk(String, #[source] walkdir::Error),
}

/// A markdown file on disk, read lazily at import time.
#[derive(Debug, Clone)]
pub struct FileSource {
    filename: String,
    relative_path: String,
    absolute_path: PathBuf,
}

impl FileSource {
    fn new(root: &Path, absolute: &Path) -> Self {
        let relative = absolute.strip_prefix(root).unwrap_or(absolute);
        // `/`-separated regardless of platform, matching the importer contract.
        let relative_path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let filename = absolute
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self { filename, relative_path, absolute_path: absolute.to_path_buf() }
    }

    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }
}

impl DocumentSource for FileSource {
    fn filename(&self) -> &str {
        &self.filename
    }

    fn path(&self) -> &str {
        &self.relative_path
    }

    fn read(&self) -> Result<String, SourceError> {
        std::fs::read_to_string(&self.absolute_path).map_err(|e| SourceError::Read {
            path: self.absolute_path.display().to_string(),
            source: e,
        })
    }
}

/// Collect all markdown files under `root`, sorted by relative path.
///
/// Hidden directories, common non-vault directories, and the configured
/// exclusions (relative to `root`) are skipped.
pub fn collect_markdown_files(
    root: &Path,
    excluded: &[PathBuf],
) -> Result<Vec<FileSource>, WalkError> {
    if !root.exists() {
        return Err(WalkError::MissingRoot(root.display().to_string()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_excluded(e, root, excluded))
    {
        let entry = entry.map_err(|e| WalkError::Walk(root.display().to_string(), e))?;
        let path = entry.path();
        if !path.is_file() || !is_markdown_file(path) {
            continue;
        }
        files.push(FileSource::new(root, path));
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(files)
}

fn is_excluded(entry: &walkdir::DirEntry, root: &Path, excluded: &[PathBuf]) -> bool {
    // Never filter the root itself.
    if entry.depth() == 0 {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') {
        return true;
    }
    if matches!(name.as_ref(), "node_modules" | "target" | "__pycache__" | "venv") {
        return true;
    }

    if !excluded.is_empty() {
        if let Ok(relative) = entry.path().strip_prefix(root) {
            return excluded.iter().any(|ex| relative.starts_with(ex));
        }
    }

    false
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("md"))
}
