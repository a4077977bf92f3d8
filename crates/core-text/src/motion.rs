//! Cursor motion helpers.
//!
//! These operate purely on a `Buffer` + `Position` pair and are free of editor
//! state. Horizontal and word motions wrap across line boundaries. Vertical
//! motions keep a sticky visual column supplied by the caller.

use crate::width::{col_for_visual, visual_col};
use crate::{Buffer, Position};

/// Move left one char; from column 0 go to the end of the previous line.
pub fn left(buf: &Buffer, pos: &mut Position) {
    if pos.col > 0 {
        pos.col -= 1;
    } else if pos.line > 0 {
        pos.line -= 1;
        pos.col = buf.line_len(pos.line);
    }
}

/// Move right one char; from end of line go to the start of the next line.
pub fn right(buf: &Buffer, pos: &mut Position) {
    if pos.col < buf.line_len(pos.line) {
        pos.col += 1;
    } else if pos.line + 1 < buf.line_count() {
        pos.line += 1;
        pos.col = 0;
    }
}

pub fn line_start(pos: &mut Position) {
    pos.col = 0;
}

pub fn line_end(buf: &Buffer, pos: &mut Position) {
    pos.col = buf.line_len(pos.line);
}

pub fn doc_start(pos: &mut Position) {
    *pos = Position::origin();
}

pub fn doc_end(buf: &Buffer, pos: &mut Position) {
    *pos = buf.end_position();
}

/// Move up one line preserving a target visual column (sticky). Returns the updated sticky column.
/// Caller should keep the returned value across successive vertical motions. If `sticky_col`
/// is `None`, it is computed from the current position.
pub fn up(buf: &Buffer, pos: &mut Position, sticky_col: Option<usize>) -> Option<usize> {
    lines_up(buf, pos, 1, sticky_col)
}

/// Move down one line preserving sticky visual column.
pub fn down(buf: &Buffer, pos: &mut Position, sticky_col: Option<usize>) -> Option<usize> {
    lines_down(buf, pos, 1, sticky_col)
}

/// Move up by `n` lines (stopping at the first line).
pub fn lines_up(
    buf: &Buffer,
    pos: &mut Position,
    n: usize,
    sticky_col: Option<usize>,
) -> Option<usize> {
    let target = pos.line.saturating_sub(n);
    vertical_to(buf, pos, target, sticky_col)
}

/// Move down by `n` lines (stopping at the last line).
pub fn lines_down(
    buf: &Buffer,
    pos: &mut Position,
    n: usize,
    sticky_col: Option<usize>,
) -> Option<usize> {
    let last = buf.line_count() - 1;
    let target = pos.line.saturating_add(n).min(last);
    vertical_to(buf, pos, target, sticky_col)
}

fn vertical_to(
    buf: &Buffer,
    pos: &mut Position,
    target: usize,
    sticky_col: Option<usize>,
) -> Option<usize> {
    let sticky = sticky_col.unwrap_or_else(|| visual_col(&buf.line(pos.line), pos.col));
    if target == pos.line {
        return Some(sticky);
    }
    pos.line = target;
    pos.col = col_for_visual(&buf.line(target), sticky);
    Some(sticky)
}

/// Move to the start of the next word: skip the rest of the current word, then
/// any whitespace. At end of line this wraps to the next line's start.
pub fn word_right(buf: &Buffer, pos: &mut Position) {
    let chars: Vec<char> = buf.line(pos.line).chars().collect();
    if pos.col >= chars.len() {
        right(buf, pos);
        return;
    }
    let mut c = pos.col;
    while c < chars.len() && !chars[c].is_whitespace() {
        c += 1;
    }
    while c < chars.len() && chars[c].is_whitespace() {
        c += 1;
    }
    pos.col = c;
}

/// Mirror of [`word_right`]: skip whitespace left of the cursor, then the word
/// before it. At column 0 this wraps to the previous line's end.
pub fn word_left(buf: &Buffer, pos: &mut Position) {
    if pos.col == 0 {
        left(buf, pos);
        return;
    }
    let chars: Vec<char> = buf.line(pos.line).chars().collect();
    let mut c = pos.col.min(chars.len());
    while c > 0 && chars[c - 1].is_whitespace() {
        c -= 1;
    }
    while c > 0 && !chars[c - 1].is_whitespace() {
        c -= 1;
    }
    pos.col = c;
}
