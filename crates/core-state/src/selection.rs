//! Anchor/active selection model.

use core_text::Position;

/// A selection from `anchor` (where extension started) to `active` (the cursor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub active: Position,
}

/// Columns covered on one line by a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
    /// The line break after this line is part of the selection.
    pub includes_break: bool,
}

impl Selection {
    pub fn new(anchor: Position, active: Position) -> Self {
        Self { anchor, active }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    /// `(start, end)` in row-major order.
    pub fn normalized(&self) -> (Position, Position) {
        if self.anchor <= self.active {
            (self.anchor, self.active)
        } else {
            (self.active, self.anchor)
        }
    }

    pub fn start(&self) -> Position {
        self.normalized().0
    }

    pub fn end(&self) -> Position {
        self.normalized().1
    }

    /// Selected columns on `line`, or `None` if the line is outside the range.
    pub fn span_on_line(&self, line: usize, line_len: usize) -> Option<LineSpan> {
        let (start, end) = self.normalized();
        if self.is_empty() || line < start.line || line > end.line {
            return None;
        }
        let s = if line == start.line { start.col } else { 0 };
        let e = if line == end.line { end.col } else { line_len };
        Some(LineSpan {
            start: s.min(line_len),
            end: e.min(line_len),
            includes_break: line < end.line,
        })
    }
}

/// Optional live selection. Created lazily by the first extending motion.
#[derive(Debug, Default, Clone)]
pub struct SelectionModel {
    current: Option<Selection>,
}

impl SelectionModel {
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn set(&mut self, sel: Selection) {
        self.current = Some(sel);
    }

    pub fn get(&self) -> Option<Selection> {
        self.current
    }

    /// True when a non-empty selection exists.
    pub fn is_active(&self) -> bool {
        self.current.is_some_and(|s| !s.is_empty())
    }

    /// Non-empty selection, if any.
    pub fn active_range(&self) -> Option<(Position, Position)> {
        self.current
            .filter(|s| !s.is_empty())
            .map(|s| s.normalized())
    }

    /// Extend (or start) the selection after a cursor move from `before` to `after`.
    /// An empty selection counts as none: it re-anchors at `before`.
    pub fn extend(&mut self, before: Position, after: Position) {
        match &mut self.current {
            Some(sel) if !sel.is_empty() => sel.active = after,
            _ => self.current = Some(Selection::new(before, after)),
        }
    }
}
