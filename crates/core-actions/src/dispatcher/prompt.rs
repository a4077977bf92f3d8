//! Mini-buffer prompts: input editing and submission routing.

use std::path::PathBuf;

use super::{DispatchContext, DispatchResult, file, search};
use crate::PromptInput;
use core_model::View;
use core_state::{EditorState, PromptKind};
use core_text::Position;

pub(crate) fn handle_start(kind: PromptKind, state: &mut EditorState) -> DispatchResult {
    state.end_insert_run();
    tracing::debug!(target: "actions.dispatch", prompt = kind.label().trim_end(), "prompt_opened");
    state.prompt.begin(kind);
    DispatchResult::dirty()
}

pub(crate) fn handle_input(
    input: PromptInput,
    state: &mut EditorState,
    view: &mut View,
    ctx: &mut DispatchContext<'_>,
) -> DispatchResult {
    match input {
        PromptInput::Char(c) => state.prompt.push_char(c),
        PromptInput::Backspace => state.prompt.backspace(),
        PromptInput::Cancel => state.prompt.clear(),
        PromptInput::Submit => {
            let Some(prompt) = state.prompt.take() else {
                return DispatchResult::clean();
            };
            return submit(prompt.kind, prompt.input, state, view, ctx);
        }
    }
    DispatchResult::dirty()
}

fn submit(
    kind: PromptKind,
    input: String,
    state: &mut EditorState,
    view: &mut View,
    ctx: &mut DispatchContext<'_>,
) -> DispatchResult {
    match kind {
        PromptKind::Find => {
            if !input.is_empty() {
                state.last_search = Some(input.clone());
            }
            search::find_from(&input, view.cursor, state, view, ctx)
        }
        PromptKind::ReplaceTerm => {
            if input.is_empty() {
                ctx.info(state, "Nothing to find");
            } else {
                state.prompt.begin(PromptKind::ReplaceWith { term: input });
            }
            DispatchResult::dirty()
        }
        PromptKind::ReplaceWith { term } => search::replace(&term, &input, state, view, ctx),
        PromptKind::GoToLine => go_to_line(input.trim(), state, view, ctx),
        PromptKind::Open => match path_from(&input) {
            Some(path) => file::open_path(&path, state, view, ctx),
            None => {
                ctx.info(state, "No file name given");
                DispatchResult::dirty()
            }
        },
        PromptKind::SaveAs => match path_from(&input) {
            Some(path) => file::save_as(&path, state, ctx),
            None => {
                ctx.info(state, "No file name given");
                DispatchResult::dirty()
            }
        },
    }
}

fn path_from(input: &str) -> Option<PathBuf> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}

/// 1-based target; out-of-range values clamp to the document with a note.
fn go_to_line(
    input: &str,
    state: &mut EditorState,
    view: &mut View,
    ctx: &mut DispatchContext<'_>,
) -> DispatchResult {
    let Ok(requested) = input.parse::<usize>() else {
        ctx.error(state, format!("Invalid line number: {input}"));
        return DispatchResult::dirty();
    };
    let count = state.buffer.line_count();
    let line = requested.clamp(1, count);
    if line != requested {
        ctx.info(state, format!("Line clamped to {line}"));
    }
    state.selection.clear();
    view.cursor = Position::new(line - 1, 0);
    view.sticky_col = None;
    DispatchResult::dirty()
}
