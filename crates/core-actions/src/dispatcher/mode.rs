//! Mode transitions (Navigation <-> Insert).

use super::DispatchResult;
use crate::ModeChange;
use core_state::{EditorState, Mode};

/// Pure transition table. `EnterInsert` only changes Navigation; `Esc`
/// returns to Navigation from anywhere.
pub fn transition(mode: Mode, change: ModeChange) -> Mode {
    match (mode, change) {
        (Mode::Navigation, ModeChange::EnterInsert) => Mode::Insert,
        (Mode::Insert, ModeChange::EnterInsert) => Mode::Insert,
        (_, ModeChange::LeaveInsert) => Mode::Navigation,
    }
}

pub(crate) fn handle_mode_change(mc: ModeChange, state: &mut EditorState) -> DispatchResult {
    state.end_insert_run();
    let had_selection = state.selection.get().is_some();
    if mc == ModeChange::LeaveInsert {
        state.selection.clear();
    }
    let next = transition(state.mode, mc);
    if next == state.mode && !had_selection {
        return DispatchResult::clean();
    }
    tracing::debug!(target: "actions.dispatch", from = ?state.mode, to = ?next, "mode_changed");
    state.mode = next;
    DispatchResult::dirty()
}
