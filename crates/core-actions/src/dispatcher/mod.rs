//! Dispatcher applying `Action` to the editor model.
//!
//! Decomposed into focused sub-modules:
//! * `motion`    - cursor movement and selection extension
//! * `edit`      - text mutation (insert/delete/newline/line ops)
//! * `mode`      - Navigation <-> Insert transitions
//! * `undo`      - undo / redo
//! * `clipboard` - select all, copy, cut, paste
//! * `search`    - find, find next, replace all
//! * `prompt`    - mini-buffer input and submission
//! * `file`      - new, open, save, save as and the unsaved-changes check
//!
//! Every handler that mutates the buffer takes an undo snapshot first. The
//! cursor is re-clamped after every action.

use std::time::Instant;

use crate::host::Host;
use crate::{Action, Toggle};
use core_config::Config;
use core_model::EditorModel;
use core_state::{EditorState, MessageLevel};

mod clipboard;
mod edit;
pub(crate) mod file;
pub mod mode;
mod motion;
mod prompt;
mod search;
mod undo;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
    pub quit: bool,
    /// The whole document was swapped (new/open); caches keyed on the old
    /// document are invalid.
    pub buffer_replaced: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
            buffer_replaced: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
            buffer_replaced: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
            buffer_replaced: false,
        }
    }
    pub fn buffer_replaced() -> Self {
        Self {
            dirty: true,
            quit: false,
            buffer_replaced: true,
        }
    }
}

/// Everything a handler may need besides the model.
pub struct DispatchContext<'a> {
    pub host: &'a mut Host,
    pub config: &'a Config,
    pub now: Instant,
}

impl DispatchContext<'_> {
    pub fn info(&mut self, state: &mut EditorState, text: impl Into<String>) {
        let text = text.into();
        self.host.status.show_message(&text);
        state.set_ephemeral(text, MessageLevel::Info, self.config.message_ttl(), self.now);
    }

    pub fn error(&mut self, state: &mut EditorState, text: impl Into<String>) {
        let text = text.into();
        tracing::warn!(target: "actions.dispatch", message = %text, "status_error");
        self.host.status.show_error(&text);
        state.set_ephemeral(text, MessageLevel::Error, self.config.error_ttl(), self.now);
    }
}

/// Apply an action to the model. Returns whether a render is needed
/// (`dirty`) or the editor should exit (`quit`).
pub fn dispatch(
    action: Action,
    model: &mut EditorModel,
    ctx: &mut DispatchContext<'_>,
) -> DispatchResult {
    let (state, view) = model.split();
    tracing::trace!(target: "actions.dispatch", ?action, mode = ?state.mode, "dispatch");
    let result = match action {
        Action::Motion { kind, extend } => motion::handle_motion(kind, extend, state, view),
        Action::Edit(kind) => edit::handle_edit(kind, state, view, ctx),
        Action::ModeChange(mc) => mode::handle_mode_change(mc, state),
        Action::Undo => undo::handle_undo(state, view),
        Action::Redo => undo::handle_redo(state, view),
        Action::SelectAll => clipboard::handle_select_all(state, view, ctx),
        Action::Copy => clipboard::handle_copy(state, ctx),
        Action::Cut => clipboard::handle_cut(state, view, ctx),
        Action::Paste => clipboard::handle_paste(state, view, ctx),
        Action::PasteText(text) => clipboard::insert_text(&text, state, view),
        Action::StartPrompt(kind) => prompt::handle_start(kind, state),
        Action::Prompt(input) => prompt::handle_input(input, state, view, ctx),
        Action::FindNext => search::handle_find_next(state, view, ctx),
        Action::File(cmd) => file::handle_file(cmd, state, view, ctx),
        Action::Toggle(t) => handle_toggle(t, state, ctx),
        Action::WordCount => {
            let text = format!(
                "Words: {}, Characters: {}, Lines: {}",
                state.buffer.word_count(),
                state.buffer.char_count(),
                state.buffer.line_count()
            );
            ctx.info(state, text);
            DispatchResult::dirty()
        }
        Action::Quit => {
            if file::confirm_discard(state, ctx) {
                tracing::info!(target: "actions.dispatch", "quit_requested");
                DispatchResult::quit()
            } else {
                DispatchResult::dirty()
            }
        }
    };
    view.clamp_cursor(&state.buffer);
    result
}

fn handle_toggle(t: Toggle, state: &mut EditorState, ctx: &mut DispatchContext<'_>) -> DispatchResult {
    let (label, on) = match t {
        Toggle::Typewriter => {
            state.typewriter = !state.typewriter;
            ("Typewriter mode", state.typewriter)
        }
        Toggle::DistractionFree => {
            state.distraction_free = !state.distraction_free;
            ("Distraction-free mode", state.distraction_free)
        }
        Toggle::LineNumbers => {
            state.line_numbers = !state.line_numbers;
            ("Line numbers", state.line_numbers)
        }
    };
    tracing::debug!(target: "actions.dispatch", toggle = ?t, on, "toggled");
    ctx.info(state, format!("{label}: {}", if on { "ON" } else { "OFF" }));
    DispatchResult::dirty()
}
