//! Text edit handling (insert/backspace/delete/newline/line ops).
//!
//! Typing, newline and tab replace an active selection. Backspace and
//! Delete with a selection remove it and nothing else.

use super::{DispatchContext, DispatchResult};
use crate::EditKind;
use core_model::View;
use core_state::{EditorState, Mode};

/// Delete the selection (with its own undo frame) and park the cursor at
/// its start. Returns false when nothing was selected.
pub(super) fn take_selection(state: &mut EditorState, view: &mut View) -> bool {
    match state.delete_selection(view.cursor) {
        Some((_, at)) => {
            view.cursor = at;
            true
        }
        None => false,
    }
}

pub(crate) fn handle_edit(
    kind: EditKind,
    state: &mut EditorState,
    view: &mut View,
    ctx: &mut DispatchContext<'_>,
) -> DispatchResult {
    let before = view.cursor;
    view.sticky_col = None;
    let changed = match kind {
        EditKind::InsertChar(ch) => {
            if take_selection(state, view) {
                state.end_insert_run();
            } else {
                state.begin_insert_edit(view.cursor);
            }
            view.cursor = state.buffer.insert_char(view.cursor.line, view.cursor.col, ch);
            true
        }
        EditKind::InsertNewline => {
            state.end_insert_run();
            if !take_selection(state, view) {
                state.push_snapshot(view.cursor);
            }
            view.cursor = state.buffer.split_line(view.cursor.line, view.cursor.col);
            true
        }
        EditKind::InsertTab => {
            if !take_selection(state, view) {
                state.push_snapshot(view.cursor);
            }
            let spaces = " ".repeat(ctx.config.file.editor.tab_width.max(1));
            view.cursor = state.buffer.insert_str(view.cursor, &spaces);
            true
        }
        EditKind::Backspace => take_selection(state, view) || backspace(state, view),
        EditKind::DeleteForward => take_selection(state, view) || delete_forward(state, view),
        EditKind::DeleteLine => {
            state.selection.clear();
            state.push_snapshot(view.cursor);
            let row = view.cursor.line;
            state.buffer.delete_line(row);
            view.cursor.line = row.min(state.buffer.line_count() - 1);
            view.clamp_cursor(&state.buffer);
            true
        }
        EditKind::OpenLineBelow => {
            state.selection.clear();
            state.push_snapshot(view.cursor);
            let row = view.cursor.line;
            let len = state.buffer.line_len(row);
            view.cursor = state.buffer.split_line(row, len);
            state.mode = Mode::Insert;
            true
        }
    };
    if !changed {
        return DispatchResult::clean();
    }
    tracing::trace!(target: "actions.dispatch", op = ?kind, line = before.line, col = before.col, to_line = view.cursor.line, to_col = view.cursor.col, "edit");
    DispatchResult::dirty()
}

fn backspace(state: &mut EditorState, view: &mut View) -> bool {
    let pos = view.cursor;
    if pos.col > 0 {
        state.push_snapshot(pos);
        state.buffer.delete_char(pos.line, pos.col - 1);
        view.cursor.col -= 1;
        true
    } else if pos.line > 0 {
        state.push_snapshot(pos);
        let prev_len = state.buffer.line_len(pos.line - 1);
        state.buffer.join_line(pos.line - 1);
        view.cursor = core_text::Position::new(pos.line - 1, prev_len);
        true
    } else {
        false
    }
}

fn delete_forward(state: &mut EditorState, view: &mut View) -> bool {
    let pos = view.cursor;
    if pos.col < state.buffer.line_len(pos.line) {
        state.push_snapshot(pos);
        state.buffer.delete_char(pos.line, pos.col);
        true
    } else if pos.line + 1 < state.buffer.line_count() {
        state.push_snapshot(pos);
        state.buffer.join_line(pos.line);
        true
    } else {
        false
    }
}
