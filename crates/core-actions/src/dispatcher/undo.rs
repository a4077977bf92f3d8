//! Undo / Redo dispatch. Underflow is a silent no-op.

use super::DispatchResult;
use core_model::View;
use core_state::EditorState;

pub(crate) fn handle_undo(state: &mut EditorState, view: &mut View) -> DispatchResult {
    if state.undo(&mut view.cursor) {
        state.selection.clear();
        view.sticky_col = None;
        tracing::trace!(target: "actions.dispatch", op = "undo", undo_depth = state.undo_depth(), redo_depth = state.redo_depth(), "undo");
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

pub(crate) fn handle_redo(state: &mut EditorState, view: &mut View) -> DispatchResult {
    if state.redo(&mut view.cursor) {
        state.selection.clear();
        view.sticky_col = None;
        tracing::trace!(target: "actions.dispatch", op = "redo", undo_depth = state.undo_depth(), redo_depth = state.redo_depth(), "redo");
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}
