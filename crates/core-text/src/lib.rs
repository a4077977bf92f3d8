//! Rope-backed line buffer.
//!
//! A document is addressed as `(line, col)` where `col` counts Unicode scalar
//! values inside the line, excluding the line break. The rope is built with
//! `\n` as its only recognized line break, so a document always has at least
//! one (possibly empty) line and a trailing `\n` opens a new empty line.

use ropey::Rope;

pub mod motion;
pub mod search;
pub mod width;

pub use search::{ReplaceOutcome, SearchError, SearchMatch};
pub use width::{char_width, visual_col};

/// A position inside a buffer: line index plus char column within that line.
///
/// Ordering is row-major, which is what selection normalization relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    pub const fn origin() -> Self {
        Self { line: 0, col: 0 }
    }

    pub fn clamp_to<F>(&mut self, line_count: usize, mut line_len_fn: F)
    where
        F: FnMut(usize) -> usize,
    {
        if line_count == 0 {
            self.line = 0;
            self.col = 0;
            return;
        }
        if self.line >= line_count {
            self.line = line_count - 1;
        }
        let max_len = line_len_fn(self.line);
        if self.col > max_len {
            self.col = max_len;
        }
    }
}

/// A text buffer backed by a `ropey::Rope`.
#[derive(Clone)]
pub struct Buffer {
    rope: Rope,
    pub name: String,
    dirty: bool,
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("name", &self.name)
            .field("lines", &self.line_count())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new("")
    }
}

impl Buffer {
    /// Empty document (`[""]`).
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_text(name, "")
    }

    /// Build a document from LF-normalized text. A single trailing newline
    /// terminates the last line rather than opening an empty one.
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        let body = text.strip_suffix('\n').unwrap_or(text);
        Self {
            rope: Rope::from_str(body),
            name: name.into(),
            dirty: false,
        }
    }

    /// Convenience constructor joining `lines` with `\n`.
    pub fn from_lines<I, S>(name: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for (i, l) in lines.into_iter().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.push_str(l.as_ref());
        }
        Self {
            rope: Rope::from_str(&text),
            name: name.into(),
            dirty: false,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Total number of lines; never zero.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Char length of a line excluding its line break. Out of range lines have length 0.
    pub fn line_len(&self, row: usize) -> usize {
        if row >= self.line_count() {
            return 0;
        }
        let line = self.rope.line(row);
        let n = line.len_chars();
        if n > 0 && line.char(n - 1) == '\n' {
            n - 1
        } else {
            n
        }
    }

    /// Content of a line without its line break (empty when out of range).
    pub fn line(&self, row: usize) -> String {
        if row >= self.line_count() {
            return String::new();
        }
        let mut s = self.rope.line(row).to_string();
        if s.ends_with('\n') {
            s.pop();
        }
        s
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.line_count()).map(|row| self.line(row))
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Clamp a position onto a valid cursor location.
    pub fn clamp(&self, pos: Position) -> Position {
        let mut p = pos;
        p.clamp_to(self.line_count(), |l| self.line_len(l));
        p
    }

    /// Position just past the last character of the document.
    pub fn end_position(&self) -> Position {
        let last = self.line_count() - 1;
        Position::new(last, self.line_len(last))
    }

    fn char_index(&self, pos: Position) -> usize {
        let p = self.clamp(pos);
        self.rope.line_to_char(p.line) + p.col
    }

    /// Insert a single character. `'\n'` splits the line. Returns the position
    /// just after the inserted character.
    pub fn insert_char(&mut self, row: usize, col: usize, ch: char) -> Position {
        if ch == '\n' {
            return self.split_line(row, col);
        }
        let p = self.clamp(Position::new(row, col));
        let idx = self.char_index(p);
        self.rope.insert_char(idx, ch);
        self.dirty = true;
        Position::new(p.line, p.col + 1)
    }

    /// Insert text that may span several lines. Returns the position right after
    /// the inserted text.
    pub fn insert_str(&mut self, pos: Position, text: &str) -> Position {
        let p = self.clamp(pos);
        if text.is_empty() {
            return p;
        }
        let idx = self.char_index(p);
        self.rope.insert(idx, text);
        self.dirty = true;
        match text.rfind('\n') {
            None => Position::new(p.line, p.col + text.chars().count()),
            Some(last_nl) => {
                let breaks = text.matches('\n').count();
                let tail = text[last_nl + 1..].chars().count();
                Position::new(p.line + breaks, tail)
            }
        }
    }

    /// Break `row` at `col`; the suffix becomes a new line below. Returns the
    /// start of the new line.
    pub fn split_line(&mut self, row: usize, col: usize) -> Position {
        let p = self.clamp(Position::new(row, col));
        let idx = self.char_index(p);
        self.rope.insert_char(idx, '\n');
        self.dirty = true;
        Position::new(p.line + 1, 0)
    }

    /// Merge `row + 1` onto the end of `row`. Returns false on the last line.
    pub fn join_line(&mut self, row: usize) -> bool {
        if row + 1 >= self.line_count() {
            return false;
        }
        let idx = self.rope.line_to_char(row) + self.line_len(row);
        self.rope.remove(idx..idx + 1);
        self.dirty = true;
        true
    }

    /// Remove the character at `(row, col)`. No-op at end of line.
    pub fn delete_char(&mut self, row: usize, col: usize) -> Option<char> {
        let p = self.clamp(Position::new(row, col));
        if p.col >= self.line_len(p.line) {
            return None;
        }
        let idx = self.char_index(p);
        let ch = self.rope.char(idx);
        self.rope.remove(idx..idx + 1);
        self.dirty = true;
        Some(ch)
    }

    /// Remove the text between two positions (in either order) and return it.
    /// Across lines this joins the prefix of the first line with the suffix of
    /// the last line.
    pub fn delete_range(&mut self, start: Position, end: Position) -> String {
        let (a, b) = if start <= end { (start, end) } else { (end, start) };
        let s = self.char_index(a);
        let e = self.char_index(b);
        if s >= e {
            return String::new();
        }
        let removed = self.rope.slice(s..e).to_string();
        self.rope.remove(s..e);
        self.dirty = true;
        tracing::trace!(target: "text.buffer", op = "delete_range", from_line = a.line, to_line = b.line, chars = e - s, "edit");
        removed
    }

    /// Remove a whole line and return its content. The last remaining line is
    /// cleared instead of removed.
    pub fn delete_line(&mut self, row: usize) -> String {
        let count = self.line_count();
        if row >= count {
            return String::new();
        }
        let content = self.line(row);
        let start = self.rope.line_to_char(row);
        let range = if count == 1 {
            start..start + self.line_len(row)
        } else if row + 1 < count {
            start..self.rope.line_to_char(row + 1)
        } else {
            // last line: take the break that precedes it
            start - 1..start + self.line_len(row)
        };
        if !range.is_empty() || count > 1 {
            self.rope.remove(range);
            self.dirty = true;
        }
        tracing::trace!(target: "text.buffer", op = "delete_line", row, "edit");
        content
    }

    /// Replace the content of `row` (line break untouched).
    pub fn replace_line(&mut self, row: usize, text: &str) {
        if row >= self.line_count() {
            return;
        }
        let start = self.rope.line_to_char(row);
        let end = start + self.line_len(row);
        self.rope.remove(start..end);
        self.rope.insert(start, text);
        self.dirty = true;
    }

    /// Text between two positions (in either order), line breaks included.
    pub fn text_range(&self, start: Position, end: Position) -> String {
        let (a, b) = if start <= end { (start, end) } else { (end, start) };
        let s = self.char_index(a);
        let e = self.char_index(b);
        if s >= e {
            return String::new();
        }
        self.rope.slice(s..e).to_string()
    }

    /// Whole document joined with `\n` (no trailing newline).
    pub fn to_text(&self) -> String {
        self.rope.to_string()
    }

    /// Replace the whole document content, keeping the name.
    pub fn set_text(&mut self, text: &str) {
        let body = text.strip_suffix('\n').unwrap_or(text);
        self.rope = Rope::from_str(body);
        self.dirty = true;
    }

    /// Whitespace-separated word count.
    pub fn word_count(&self) -> usize {
        self.rope
            .lines()
            .map(|l| l.to_string().split_whitespace().count())
            .sum()
    }

    /// Character count excluding line breaks.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars() - (self.line_count() - 1)
    }
}
