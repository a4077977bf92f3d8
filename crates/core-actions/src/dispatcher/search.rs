//! Find, find next and replace all.

use super::{DispatchContext, DispatchResult};
use core_model::View;
use core_state::{EditorState, PromptKind, Selection};
use core_text::{Position, search};

/// Jump to the first match of `term` at or after `from` (wrapping) and
/// select it.
pub(super) fn find_from(
    term: &str,
    from: Position,
    state: &mut EditorState,
    view: &mut View,
    ctx: &mut DispatchContext<'_>,
) -> DispatchResult {
    if term.is_empty() {
        ctx.info(state, "Nothing to find");
        return DispatchResult::dirty();
    }
    let matches = match search::find_all(&state.buffer, term) {
        Ok(m) => m,
        Err(e) => {
            ctx.error(state, format!("Search failed: {e}"));
            return DispatchResult::dirty();
        }
    };
    match search::find_next(&matches, from) {
        Some(m) => {
            let index = matches.iter().position(|x| *x == m).map_or(1, |i| i + 1);
            state.selection.set(Selection::new(m.end(), m.start()));
            view.cursor = m.start();
            view.sticky_col = None;
            tracing::debug!(target: "actions.dispatch", line = m.line, col = m.col, index, total = matches.len(), "search_match");
            ctx.info(state, format!("Match {index} of {}: {term}", matches.len()));
        }
        None => ctx.info(state, format!("Not found: {term}")),
    }
    DispatchResult::dirty()
}

pub(crate) fn handle_find_next(
    state: &mut EditorState,
    view: &mut View,
    ctx: &mut DispatchContext<'_>,
) -> DispatchResult {
    state.end_insert_run();
    let Some(term) = state.last_search.clone() else {
        state.prompt.begin(PromptKind::Find);
        return DispatchResult::dirty();
    };
    // step past the match only when it is the one already selected
    let on_selected_match = state
        .selection
        .active_range()
        .is_some_and(|(start, _)| start == view.cursor);
    let from = if on_selected_match {
        Position::new(view.cursor.line, view.cursor.col + 1)
    } else {
        view.cursor
    };
    find_from(&term, from, state, view, ctx)
}

pub(super) fn replace(
    term: &str,
    replacement: &str,
    state: &mut EditorState,
    view: &mut View,
    ctx: &mut DispatchContext<'_>,
) -> DispatchResult {
    if term.is_empty() {
        ctx.info(state, "Nothing to find");
        return DispatchResult::dirty();
    }
    let found = match search::find_all(&state.buffer, term) {
        Ok(m) => m.len(),
        Err(e) => {
            ctx.error(state, format!("Replace failed: {e}"));
            return DispatchResult::dirty();
        }
    };
    if found == 0 {
        ctx.info(state, format!("Not found: {term}"));
        return DispatchResult::dirty();
    }
    state.push_snapshot(view.cursor);
    match search::replace_all(&mut state.buffer, term, replacement) {
        Ok(outcome) => {
            state.selection.clear();
            view.clamp_cursor(&state.buffer);
            let noun = if outcome.occurrences == 1 { "occurrence" } else { "occurrences" };
            ctx.info(state, format!("Replaced {} {noun}", outcome.occurrences));
        }
        Err(e) => ctx.error(state, format!("Replace failed: {e}")),
    }
    DispatchResult::dirty()
}
