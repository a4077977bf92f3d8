//! Load and save helpers.
//!
//! Documents are held LF-only; these helpers normalize line endings on the
//! way in and restore the original style (and trailing newline) on the way
//! out. Storage goes through the `FileIo` collaborator.

use std::path::{Path, PathBuf};

use core_state::{EditorState, LineEnding, normalize_line_endings, restore_line_endings};
use core_text::Buffer;
use thiserror::Error;

use crate::host::FileIo;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no file path set")]
    NoFileName,
}

/// Result of loading a file.
#[derive(Debug)]
pub struct LoadedDocument {
    pub buffer: Buffer,
    pub path: PathBuf,
    pub line_ending: LineEnding,
    pub had_trailing_newline: bool,
    pub mixed_line_endings: bool,
}

fn buffer_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string())
}

/// Read `path` into a new buffer with normalized line endings.
pub fn load_document(io: &mut dyn FileIo, path: &Path) -> Result<LoadedDocument, FileError> {
    let content = io.read(path).map_err(|source| {
        tracing::error!(target: "io", path = %path.display(), error = %source, "file_open_error");
        FileError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let norm = normalize_line_endings(&content);
    let buffer = Buffer::from_text(buffer_name(path), &norm.normalized);
    tracing::info!(
        target: "io",
        path = %path.display(),
        lines = buffer.line_count(),
        line_ending = norm.original.label(),
        mixed = norm.mixed,
        "file_opened"
    );
    Ok(LoadedDocument {
        buffer,
        path: path.to_path_buf(),
        line_ending: norm.original,
        had_trailing_newline: norm.had_trailing_newline,
        mixed_line_endings: norm.mixed,
    })
}

/// Write the document to `target` (or its bound file name), restoring the
/// original line-ending style. Marks the buffer clean and returns the path
/// written.
pub fn save_document(
    io: &mut dyn FileIo,
    state: &mut EditorState,
    target: Option<&Path>,
) -> Result<PathBuf, FileError> {
    let path = match target {
        Some(p) => p.to_path_buf(),
        None => state.file_name.clone().ok_or(FileError::NoFileName)?,
    };
    let content = restore_line_endings(
        &state.buffer.to_text(),
        state.original_line_ending,
        state.had_trailing_newline,
    );
    io.write(&path, &content).map_err(|source| {
        tracing::error!(target: "io", path = %path.display(), error = %source, "file_write_error");
        FileError::Write {
            path: path.clone(),
            source,
        }
    })?;
    state.buffer.mark_clean();
    tracing::info!(target: "io", path = %path.display(), bytes = content.len(), "file_saved");
    Ok(path)
}
