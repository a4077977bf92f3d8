//! Editor state: document, mode, undo engine, selection, clipboard and the
//! small bits of session metadata the renderer and dispatcher share.
//!
//! Insert coalescing (optional, off by default):
//! - A contiguous run of character inserts is captured by a single undo frame
//!   taken lazily at the first insert of the run.
//! - Boundaries: newline, any structural edit, cursor motion and mode changes.
//!   The dispatcher calls `end_insert_run` at those points.
//!
//! Every other mutation (backspace, delete, line delete, paste, cut,
//! replace-all) pushes its own frame before touching the buffer, so each one
//! undoes individually.
//!
//! The cursor itself lives in `core-model::View`; this crate stays
//! document-centric and takes the cursor by reference where it needs it.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use core_text::{Buffer, Position};

pub mod clipboard;
pub mod line_ending;
pub mod prompt;
pub mod selection;
pub mod undo;

pub use clipboard::{Clipboard, ClipboardError, ClipboardProvider};
pub use line_ending::{LineEnding, NormalizedText, normalize_line_endings, restore_line_endings};
pub use prompt::{Prompt, PromptKind, PromptState};
pub use selection::{LineSpan, Selection, SelectionModel};
pub use undo::{DEFAULT_UNDO_DEPTH, InsertRun, UndoEngine, UndoFrame};

/// Current editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Movement keys navigate; letters are never inserted.
    #[default]
    Navigation,
    /// Printable keys insert text at the cursor.
    Insert,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Navigation => "NAV",
            Mode::Insert => "INSERT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Error,
}

/// Status message that disappears after its deadline.
#[derive(Debug, Clone)]
pub struct EphemeralMessage {
    pub text: String,
    pub level: MessageLevel,
    pub expires_at: Instant,
}

/// Top-level editor state container (single document).
pub struct EditorState {
    pub buffer: Buffer,
    pub mode: Mode,
    undo: UndoEngine,
    pub selection: SelectionModel,
    pub clipboard: Clipboard,
    pub prompt: PromptState,
    pub file_name: Option<PathBuf>,
    pub original_line_ending: LineEnding,
    pub had_trailing_newline: bool,
    pub ephemeral_status: Option<EphemeralMessage>,
    /// Term of the last confirmed find, reused by find-next.
    pub last_search: Option<String>,
    pub typewriter: bool,
    pub distraction_free: bool,
    pub line_numbers: bool,
    pub cursor_visible: bool,
}

impl EditorState {
    pub fn new(buffer: Buffer) -> Self {
        Self {
            buffer,
            mode: Mode::Navigation,
            undo: UndoEngine::new(),
            selection: SelectionModel::default(),
            clipboard: Clipboard::new(),
            prompt: PromptState::default(),
            file_name: None,
            original_line_ending: LineEnding::Lf,
            had_trailing_newline: false,
            ephemeral_status: None,
            last_search: None,
            typewriter: false,
            distraction_free: false,
            line_numbers: true,
            cursor_visible: true,
        }
    }

    pub fn set_undo_limits(&mut self, depth: usize, coalesce_inserts: bool) {
        self.undo.set_limits(depth, coalesce_inserts);
    }

    pub fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// File name component for display, `[No Name]` when unbound.
    pub fn display_name(&self) -> String {
        self.file_name
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "[No Name]".to_string())
    }

    /// Swap in a freshly loaded (or new) document. History and selection are
    /// dropped; the line-ending metadata is taken from the load.
    pub fn replace_document(
        &mut self,
        buffer: Buffer,
        file_name: Option<PathBuf>,
        line_ending: LineEnding,
        had_trailing_newline: bool,
    ) {
        self.buffer = buffer;
        self.file_name = file_name;
        self.original_line_ending = line_ending;
        self.had_trailing_newline = had_trailing_newline;
        self.undo.clear();
        self.selection.clear();
        self.last_search = None;
    }

    pub fn set_ephemeral<S: Into<String>>(
        &mut self,
        msg: S,
        level: MessageLevel,
        ttl: Duration,
        now: Instant,
    ) {
        self.ephemeral_status = Some(EphemeralMessage {
            text: msg.into(),
            level,
            expires_at: now + ttl,
        });
    }

    /// Drop an expired message; returns true if one was cleared.
    pub fn tick_ephemeral(&mut self, now: Instant) -> bool {
        if let Some(m) = &self.ephemeral_status
            && now >= m.expires_at
        {
            self.ephemeral_status = None;
            return true;
        }
        false
    }

    /// Capture the current document before a discrete edit.
    pub fn push_snapshot(&mut self, cursor: Position) {
        self.undo.push_snapshot(cursor, &self.buffer);
    }

    /// Capture the current document before a character insert (coalescing aware).
    pub fn begin_insert_edit(&mut self, cursor: Position) {
        self.undo.begin_insert(cursor, &self.buffer);
    }

    pub fn end_insert_run(&mut self) {
        self.undo.end_insert_run();
    }

    pub fn undo(&mut self, cursor: &mut Position) -> bool {
        self.undo.undo(cursor, &mut self.buffer)
    }

    pub fn redo(&mut self, cursor: &mut Position) -> bool {
        self.undo.redo(cursor, &mut self.buffer)
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.undo_depth()
    }
    pub fn redo_depth(&self) -> usize {
        self.undo.redo_depth()
    }
    pub fn insert_run(&self) -> InsertRun {
        self.undo.insert_run()
    }

    /// Remove the selected text (with an undo frame) and return it together
    /// with the position the cursor should take.
    pub fn delete_selection(&mut self, cursor: Position) -> Option<(String, Position)> {
        let range = self.selection.active_range();
        // an empty selection still ends here
        self.selection.clear();
        let (start, end) = range?;
        self.push_snapshot(cursor);
        let removed = self.buffer.delete_range(start, end);
        Some((removed, start))
    }

    /// Selected text, if any.
    pub fn selected_text(&self) -> Option<String> {
        let (start, end) = self.selection.active_range()?;
        Some(self.buffer.text_range(start, end))
    }
}
