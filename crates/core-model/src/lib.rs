//! High-level editor model: the document state plus the single view onto it.
//!
//! A `View` owns presentation state (cursor, sticky column, viewport) that
//! does not belong to the document. `EditorModel` pairs it with
//! `EditorState` and hands out disjoint mutable borrows of both through
//! `split`.
//!
//! Invariants (must hold after every public call):
//! * The cursor names a valid position in the document (`clamp_cursor`).
//! * `scroll_row`/`scroll_col` never underflow; after `scroll` the cursor is
//!   inside the window (standard policy) or on the typewriter row.

use core_state::EditorState;
use core_text::{Buffer, Position, visual_col};

mod layout;
pub mod viewport;

pub use layout::{Layout, LayoutRegion};
pub use viewport::{
    Typewriter, Viewport, compute_hscroll_intent, compute_scroll_intent, gutter_width, is_dimmed,
    typewriter_first_line, typewriter_target_row,
};

#[derive(Debug, Clone, Default)]
pub struct View {
    pub cursor: Position,
    /// Desired visual column carried across vertical motions.
    pub sticky_col: Option<usize>,
    pub viewport: Viewport,
    /// Cursor line at the previous scroll pass (typewriter direction check).
    prev_cursor_line: usize,
}

impl View {
    pub fn new(cursor: Position, viewport: Viewport) -> Self {
        Self {
            cursor,
            sticky_col: None,
            viewport,
            prev_cursor_line: cursor.line,
        }
    }

    pub fn clamp_cursor(&mut self, buf: &Buffer) {
        self.cursor = buf.clamp(self.cursor);
    }

    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.viewport.rows = rows;
        self.viewport.cols = cols;
    }

    /// Recompute the viewport for the current cursor. `typewriter` selects the
    /// vertical policy; horizontal scrolling always follows the standard rule
    /// inside the text area (`cols - gutter`). Returns true if the window moved.
    pub fn scroll(&mut self, buf: &Buffer, gutter: usize, typewriter: Option<&Typewriter>) -> bool {
        self.clamp_cursor(buf);
        let before = (self.viewport.scroll_row, self.viewport.scroll_col);
        let line = self.cursor.line;
        match typewriter {
            Some(tw) => {
                self.viewport.scroll_row = typewriter_first_line(
                    self.viewport.scroll_row,
                    line,
                    self.prev_cursor_line,
                    self.viewport.rows,
                    tw.position,
                );
            }
            None => {
                if let Some(first) =
                    compute_scroll_intent(self.viewport.scroll_row, line, self.viewport.rows)
                {
                    self.viewport.scroll_row = first;
                }
            }
        }
        let text_width = self.viewport.cols.saturating_sub(gutter);
        let vcol = visual_col(&buf.line(line), self.cursor.col);
        if let Some(first_col) = compute_hscroll_intent(self.viewport.scroll_col, vcol, text_width) {
            self.viewport.scroll_col = first_col;
        }
        self.prev_cursor_line = line;
        let moved = before != (self.viewport.scroll_row, self.viewport.scroll_col);
        if moved {
            tracing::trace!(
                target: "render",
                scroll_row = self.viewport.scroll_row,
                scroll_col = self.viewport.scroll_col,
                typewriter = typewriter.is_some(),
                "viewport_scrolled"
            );
        }
        moved
    }
}

pub struct EditorModel {
    state: EditorState,
    view: View,
}

impl EditorModel {
    pub fn new(state: EditorState) -> Self {
        Self {
            state,
            view: View::default(),
        }
    }

    /// Helper constructor allowing an already prepared view to be injected.
    pub fn with_view(view: View, state: EditorState) -> Self {
        let mut model = Self { state, view };
        model.view.clamp_cursor(&model.state.buffer);
        model
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }
    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }
    pub fn view(&self) -> &View {
        &self.view
    }
    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    /// Disjoint mutable access to state and view.
    pub fn split(&mut self) -> (&mut EditorState, &mut View) {
        (&mut self.state, &mut self.view)
    }

    /// Gutter width for the current document and toggles.
    pub fn gutter_width(&self) -> usize {
        let shown = self.state.line_numbers && !self.state.distraction_free;
        gutter_width(self.state.buffer.line_count(), shown)
    }

    /// Recompute the viewport using the state's typewriter toggle.
    pub fn scroll(&mut self, typewriter: &Typewriter) -> bool {
        let gutter = self.gutter_width();
        let policy = self.state.typewriter.then_some(typewriter);
        self.view.scroll(&self.state.buffer, gutter, policy)
    }
}
