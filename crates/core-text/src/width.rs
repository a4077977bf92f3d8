//! Display width helpers.
//!
//! Columns in the buffer count chars; the screen counts terminal cells. These
//! helpers map between the two. Control characters (tab included) occupy one
//! cell; combining marks occupy zero and attach to the previous cell.

use unicode_width::UnicodeWidthChar;

/// Terminal cell width of a single char.
pub fn char_width(c: char) -> usize {
    if c.is_control() {
        return 1;
    }
    UnicodeWidthChar::width(c).unwrap_or(1)
}

/// Display column reached after the first `col` chars of `line`.
pub fn visual_col(line: &str, col: usize) -> usize {
    line.chars().take(col).map(char_width).sum()
}

/// Display width of a whole string.
pub fn str_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Char column whose display span contains `target` (clamped to line end).
pub fn col_for_visual(line: &str, target: usize) -> usize {
    let mut acc = 0;
    for (i, c) in line.chars().enumerate() {
        let w = char_width(c);
        if w > 0 && acc + w > target {
            return i;
        }
        acc += w;
    }
    line.chars().count()
}
