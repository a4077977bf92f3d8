//! Select all, copy, cut and paste.

use super::edit::take_selection;
use super::{DispatchContext, DispatchResult};
use core_model::View;
use core_state::{EditorState, Selection, normalize_line_endings};
use core_text::Position;

pub(crate) fn handle_select_all(
    state: &mut EditorState,
    view: &mut View,
    ctx: &mut DispatchContext<'_>,
) -> DispatchResult {
    state.end_insert_run();
    let end = state.buffer.end_position();
    state.selection.set(Selection::new(Position::origin(), end));
    view.cursor = end;
    view.sticky_col = None;
    ctx.info(state, "Selected all text");
    DispatchResult::dirty()
}

pub(crate) fn handle_copy(state: &mut EditorState, ctx: &mut DispatchContext<'_>) -> DispatchResult {
    match state.selected_text() {
        Some(text) => {
            state.clipboard.copy(&text);
            tracing::debug!(target: "actions.dispatch", chars = text.chars().count(), "copied");
            ctx.info(state, "Copied to clipboard");
        }
        None => ctx.info(state, "Nothing selected"),
    }
    DispatchResult::dirty()
}

pub(crate) fn handle_cut(
    state: &mut EditorState,
    view: &mut View,
    ctx: &mut DispatchContext<'_>,
) -> DispatchResult {
    match state.delete_selection(view.cursor) {
        Some((removed, at)) => {
            state.clipboard.copy(&removed);
            view.cursor = at;
            view.sticky_col = None;
            ctx.info(state, "Cut to clipboard");
        }
        None => ctx.info(state, "Nothing selected"),
    }
    DispatchResult::dirty()
}

pub(crate) fn handle_paste(
    state: &mut EditorState,
    view: &mut View,
    ctx: &mut DispatchContext<'_>,
) -> DispatchResult {
    let text = state.clipboard.paste();
    if text.is_empty() {
        ctx.info(state, "Clipboard is empty");
        return DispatchResult::dirty();
    }
    insert_text(&text, state, view);
    ctx.info(state, "Pasted from clipboard");
    DispatchResult::dirty()
}

/// Insert (possibly multi-line) text at the cursor as one undo frame,
/// replacing the selection if there is one.
pub(crate) fn insert_text(text: &str, state: &mut EditorState, view: &mut View) -> DispatchResult {
    let text = normalize_line_endings(text).normalized;
    if text.is_empty() {
        return DispatchResult::clean();
    }
    state.end_insert_run();
    if !take_selection(state, view) {
        state.push_snapshot(view.cursor);
    }
    view.cursor = state.buffer.insert_str(view.cursor, &text);
    view.sticky_col = None;
    tracing::trace!(target: "actions.dispatch", op = "insert_text", chars = text.chars().count(), to_line = view.cursor.line, to_col = view.cursor.col, "edit");
    DispatchResult::dirty()
}
