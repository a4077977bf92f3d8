//! Motion sub-dispatch (cursor movement).
//!
//! Vertical motions carry the view's sticky visual column; every other
//! motion resets it. A non-extending motion drops the selection first; an
//! extending one anchors a selection at the pre-move cursor if none exists.

use super::DispatchResult;
use crate::MotionKind;
use core_model::View;
use core_state::EditorState;
use core_text::motion;

pub(crate) fn handle_motion(
    kind: MotionKind,
    extend: bool,
    state: &mut EditorState,
    view: &mut View,
) -> DispatchResult {
    state.end_insert_run();
    let before = view.cursor;
    let had_selection = state.selection.get();
    if !extend {
        state.selection.clear();
    }
    let buf = &state.buffer;
    let page = view.viewport.rows.saturating_sub(1).max(1);
    let cursor = &mut view.cursor;
    let mut sticky = None;
    match kind {
        MotionKind::Left => motion::left(buf, cursor),
        MotionKind::Right => motion::right(buf, cursor),
        MotionKind::LineStart => motion::line_start(cursor),
        MotionKind::LineEnd => motion::line_end(buf, cursor),
        MotionKind::WordLeft => motion::word_left(buf, cursor),
        MotionKind::WordRight => motion::word_right(buf, cursor),
        MotionKind::DocStart => motion::doc_start(cursor),
        MotionKind::DocEnd => motion::doc_end(buf, cursor),
        MotionKind::Up => sticky = motion::up(buf, cursor, view.sticky_col),
        MotionKind::Down => sticky = motion::down(buf, cursor, view.sticky_col),
        MotionKind::PageUp => sticky = motion::lines_up(buf, cursor, page, view.sticky_col),
        MotionKind::PageDown => sticky = motion::lines_down(buf, cursor, page, view.sticky_col),
    }
    view.sticky_col = sticky;
    if extend {
        state.selection.extend(before, view.cursor);
    }
    if before != view.cursor || had_selection != state.selection.get() {
        tracing::trace!(target: "actions.dispatch", motion = ?kind, extend, line = before.line, col = before.col, to_line = view.cursor.line, to_col = view.cursor.col, "motion");
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}
