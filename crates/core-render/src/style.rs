//! Style layer.
//!
//! Semantic overlays (syntax classes, selection, typewriter dimming, the
//! software cursor) are collected as screen-space spans and then folded into
//! the frame in push order, so a later span wins where attributes compete.
//!
//! Invariants:
//! * A span never splits a cluster: callers compute columns with the same
//!   width function the compositor uses.
//! * Spans are row-local with half-open `[start_col, end_col)` ranges in
//!   screen cells.

use crate::{CellFlags, Frame};

/// Opaque theme class attached to cells. The painter maps tags to colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StyleTag(pub u16);

impl StyleTag {
    pub const HEADING: StyleTag = StyleTag(1);
    pub const EMPHASIS: StyleTag = StyleTag(2);
    pub const CODE: StyleTag = StyleTag(3);
    pub const QUOTE: StyleTag = StyleTag(4);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleAttr {
    Syntax(StyleTag),
    Selection,
    Dim,
    BlockCursor,
    BarCursor,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleSpan {
    pub row: u16,
    pub start_col: u16, // inclusive
    pub end_col: u16,   // exclusive
    pub attr: StyleAttr,
}

impl StyleSpan {
    pub fn width(&self) -> u16 {
        self.end_col.saturating_sub(self.start_col)
    }
}

#[derive(Default, Debug)]
pub struct StyleLayer {
    pub spans: Vec<StyleSpan>,
}

impl StyleLayer {
    pub fn new() -> Self {
        Self { spans: Vec::new() }
    }
    pub fn clear(&mut self) {
        self.spans.clear();
    }
    pub fn push(&mut self, span: StyleSpan) {
        if span.width() > 0 {
            self.spans.push(span);
        }
    }
    pub fn cursor_span(&self) -> Option<&StyleSpan> {
        self.spans
            .iter()
            .find(|s| matches!(s.attr, StyleAttr::BlockCursor | StyleAttr::BarCursor))
    }

    /// Fold every span into `frame`.
    pub fn apply(&self, frame: &mut Frame) {
        for span in &self.spans {
            match span.attr {
                StyleAttr::Syntax(tag) => {
                    frame.apply_style_span(span.start_col, span.row, span.width(), tag)
                }
                StyleAttr::Selection => frame.apply_flags_span(
                    span.start_col,
                    span.row,
                    span.width(),
                    CellFlags::SELECTED,
                ),
                StyleAttr::Dim => {
                    frame.apply_flags_span(span.start_col, span.row, span.width(), CellFlags::DIM)
                }
                StyleAttr::BlockCursor => frame.apply_flags_span(
                    span.start_col,
                    span.row,
                    span.width(),
                    CellFlags::CURSOR | CellFlags::REVERSE,
                ),
                StyleAttr::BarCursor => {
                    frame.apply_flags_span(span.start_col, span.row, span.width(), CellFlags::CURSOR)
                }
            }
        }
    }
}
