//! Viewport and scroll policies.
//!
//! Standard policy: scroll just enough to bring the cursor back inside the
//! window, vertically and horizontally. Typewriter policy: keep the cursor
//! row pinned at a fixed fraction of the window while writing forward, and
//! leave the window alone when moving back up inside it.

/// Visible window onto the document. `rows`/`cols` cover the text region
/// including the gutter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub scroll_row: usize,
    pub scroll_col: usize,
    pub rows: usize,
    pub cols: usize,
}

impl Viewport {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            scroll_row: 0,
            scroll_col: 0,
            rows,
            cols,
        }
    }

    pub fn contains_line(&self, line: usize) -> bool {
        line >= self.scroll_row && line < self.scroll_row + self.rows
    }
}

/// Typewriter settings applied to the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Typewriter {
    /// Fraction of the window height where the cursor row is kept.
    pub position: f32,
    /// Lines within this distance of the cursor stay undimmed.
    pub focus_lines: usize,
}

impl Default for Typewriter {
    fn default() -> Self {
        Self {
            position: 0.66,
            focus_lines: 3,
        }
    }
}

/// New first line keeping `cursor_line` inside a window of `text_height`
/// rows, or `None` when no scroll is needed.
pub fn compute_scroll_intent(first: usize, cursor_line: usize, text_height: usize) -> Option<usize> {
    if text_height == 0 {
        return None;
    }
    if cursor_line < first {
        return Some(cursor_line);
    }
    if cursor_line >= first + text_height {
        return Some(cursor_line + 1 - text_height);
    }
    None
}

/// Horizontal counterpart on display columns within the text area.
pub fn compute_hscroll_intent(first_col: usize, cursor_vcol: usize, text_width: usize) -> Option<usize> {
    compute_scroll_intent(first_col, cursor_vcol, text_width)
}

/// Window row the typewriter keeps the cursor on.
pub fn typewriter_target_row(rows: usize, position: f32) -> usize {
    if rows == 0 {
        return 0;
    }
    let p = if position.is_nan() { 0.0 } else { position.clamp(0.0, 1.0) };
    ((rows as f32 * p).floor() as usize).min(rows - 1)
}

/// First line under the typewriter policy.
///
/// Re-centers when the cursor moved down (or stayed) relative to
/// `prev_line`, or when it left the window; otherwise keeps `first`.
pub fn typewriter_first_line(
    first: usize,
    cursor_line: usize,
    prev_line: usize,
    rows: usize,
    position: f32,
) -> usize {
    if rows == 0 {
        return first;
    }
    let off_screen = cursor_line < first || cursor_line >= first + rows;
    if cursor_line >= prev_line || off_screen {
        cursor_line.saturating_sub(typewriter_target_row(rows, position))
    } else {
        first
    }
}

/// Rendering hint: lines farther than `focus_lines` from the cursor are dimmed.
pub fn is_dimmed(line: usize, cursor_line: usize, focus_lines: usize) -> bool {
    line.abs_diff(cursor_line) > focus_lines
}

/// Gutter width for `line_count` lines: at least four digits plus a space.
pub fn gutter_width(line_count: usize, shown: bool) -> usize {
    if !shown {
        return 0;
    }
    let digits = line_count.max(1).to_string().len();
    digits.max(4) + 1
}
