//! Collaborators the session talks to: file storage, the "unsaved changes"
//! dialog and an optional mirror for status messages.
//!
//! All calls are synchronous. Implementations live at the edge
//! (`core-terminal`, the binary, or test doubles).

use std::io;
use std::path::Path;

pub trait FileIo {
    fn read(&mut self, path: &Path) -> io::Result<String>;
    fn write(&mut self, path: &Path, text: &str) -> io::Result<()>;
}

/// `std::fs` backed storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsFileIo;

impl FileIo for FsFileIo {
    fn read(&mut self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&mut self, path: &Path, text: &str) -> io::Result<()> {
        std::fs::write(path, text.as_bytes())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    Save,
    Discard,
    Cancel,
}

pub trait ConfirmProvider {
    fn confirm(&mut self, message: &str) -> ConfirmChoice;
}

/// Receives every status message the session shows.
pub trait StatusSink {
    fn show_message(&mut self, text: &str);
    fn show_error(&mut self, text: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullStatusSink;

impl StatusSink for NullStatusSink {
    fn show_message(&mut self, _text: &str) {}
    fn show_error(&mut self, _text: &str) {}
}

pub struct Host {
    pub files: Box<dyn FileIo>,
    pub confirm: Box<dyn ConfirmProvider>,
    pub status: Box<dyn StatusSink>,
}

impl Host {
    pub fn new(files: Box<dyn FileIo>, confirm: Box<dyn ConfirmProvider>) -> Self {
        Self {
            files,
            confirm,
            status: Box::new(NullStatusSink),
        }
    }

    pub fn with_status_sink(mut self, status: Box<dyn StatusSink>) -> Self {
        self.status = status;
        self
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host").finish_non_exhaustive()
    }
}
