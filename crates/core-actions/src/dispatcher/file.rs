//! New, open, save and save as, plus the unsaved-changes check.

use std::path::Path;

use super::{DispatchContext, DispatchResult};
use crate::FileCommand;
use crate::host::ConfirmChoice;
use crate::io_ops::{load_document, save_document};
use core_model::View;
use core_state::{EditorState, LineEnding, PromptKind};
use core_text::{Buffer, Position};

pub(crate) fn handle_file(
    cmd: FileCommand,
    state: &mut EditorState,
    view: &mut View,
    ctx: &mut DispatchContext<'_>,
) -> DispatchResult {
    state.end_insert_run();
    match cmd {
        FileCommand::Save => {
            if state.file_name.is_none() {
                state.prompt.begin(PromptKind::SaveAs);
                return DispatchResult::dirty();
            }
            save(None, state, ctx);
            DispatchResult::dirty()
        }
        FileCommand::SaveAs => {
            let current = state
                .file_name
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            state.prompt.begin_with(PromptKind::SaveAs, current);
            DispatchResult::dirty()
        }
        FileCommand::New => {
            if !confirm_discard(state, ctx) {
                return DispatchResult::dirty();
            }
            state.replace_document(Buffer::new(""), None, LineEnding::Lf, false);
            reset_view(view);
            tracing::info!(target: "io", "new_document");
            ctx.info(state, "New file");
            DispatchResult::buffer_replaced()
        }
        FileCommand::Open => {
            if confirm_discard(state, ctx) {
                state.prompt.begin(PromptKind::Open);
            }
            DispatchResult::dirty()
        }
    }
}

fn reset_view(view: &mut View) {
    view.cursor = Position::origin();
    view.sticky_col = None;
    view.viewport.scroll_row = 0;
    view.viewport.scroll_col = 0;
}

/// Ask before dropping unsaved changes. True when it is fine to proceed.
pub(crate) fn confirm_discard(state: &mut EditorState, ctx: &mut DispatchContext<'_>) -> bool {
    if !state.is_dirty() {
        return true;
    }
    let message = format!("Save changes to {}?", state.display_name());
    match ctx.host.confirm.confirm(&message) {
        ConfirmChoice::Save => save(None, state, ctx),
        ConfirmChoice::Discard => {
            tracing::info!(target: "actions.dispatch", "changes_discarded");
            true
        }
        ConfirmChoice::Cancel => false,
    }
}

/// Write the document. Errors become status messages; returns success.
fn save(target: Option<&Path>, state: &mut EditorState, ctx: &mut DispatchContext<'_>) -> bool {
    match save_document(&mut *ctx.host.files, state, target) {
        Ok(path) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            ctx.info(state, format!("Saved: {name}"));
            true
        }
        Err(e) => {
            ctx.error(state, format!("Save failed: {e}"));
            false
        }
    }
}

pub(crate) fn save_as(
    path: &Path,
    state: &mut EditorState,
    ctx: &mut DispatchContext<'_>,
) -> DispatchResult {
    if save(Some(path), state, ctx) {
        state.file_name = Some(path.to_path_buf());
        state.buffer.name = state.display_name();
    }
    DispatchResult::dirty()
}

pub(crate) fn open_path(
    path: &Path,
    state: &mut EditorState,
    view: &mut View,
    ctx: &mut DispatchContext<'_>,
) -> DispatchResult {
    match load_document(&mut *ctx.host.files, path) {
        Ok(doc) => {
            let name = doc.buffer.name.clone();
            state.replace_document(
                doc.buffer,
                Some(doc.path),
                doc.line_ending,
                doc.had_trailing_newline,
            );
            reset_view(view);
            ctx.info(state, format!("Opened: {name}"));
            DispatchResult::buffer_replaced()
        }
        Err(e) => {
            ctx.error(state, format!("Open failed: {e}"));
            DispatchResult::dirty()
        }
    }
}
