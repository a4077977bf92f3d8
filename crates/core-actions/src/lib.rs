//! Actions, key translation, dispatch and the editor session.
//!
//! Flow for one key: `EditorSession::handle_event` hands the key and the
//! current mode to `translate_key`, which yields an `Action`. The
//! dispatcher applies it to the `EditorModel`, taking an undo snapshot
//! before any buffer mutation. The session then re-clamps the cursor and
//! recomputes the viewport.

pub mod dispatcher;
pub mod host;
pub mod io_ops;
pub mod key_translator;
pub mod session;

pub use dispatcher::{DispatchContext, DispatchResult, dispatch, mode::transition};
pub use host::{
    ConfirmChoice, ConfirmProvider, FileIo, FsFileIo, Host, NullStatusSink, StatusSink,
};
pub use io_ops::{FileError, LoadedDocument, load_document, save_document};
pub use key_translator::translate_key;
pub use session::EditorSession;

use core_state::PromptKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Motion { kind: MotionKind, extend: bool },
    Edit(EditKind),
    ModeChange(ModeChange),
    Undo,
    Redo,
    SelectAll,
    Copy,
    Cut,
    /// Paste from the clipboard.
    Paste,
    /// Insert text delivered by the terminal (bracketed paste).
    PasteText(String),
    StartPrompt(PromptKind),
    Prompt(PromptInput),
    FindNext,
    File(FileCommand),
    Toggle(Toggle),
    WordCount,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    WordLeft,
    WordRight,
    DocStart,
    DocEnd,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    InsertChar(char),
    InsertNewline,
    /// `tab_width` spaces.
    InsertTab,
    Backspace,
    DeleteForward,
    DeleteLine,
    /// Open an empty line below the cursor and start inserting there.
    OpenLineBelow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    EnterInsert,
    /// Esc: back to Navigation, dropping any selection.
    LeaveInsert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptInput {
    Char(char),
    Backspace,
    Submit,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCommand {
    Save,
    SaveAs,
    New,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Typewriter,
    DistractionFree,
    LineNumbers,
}
