//! Text area compositor.
//!
//! Per screen row: resolve the document row (or a `~` filler past the end),
//! then in order lay down the gutter, the text clusters, the theme's syntax
//! spans, the selection, typewriter dimming and finally the cursor.

use core_model::{Viewport, is_dimmed};
use core_state::{Mode, Selection};
use core_text::{Buffer, Position, char_width, visual_col};

use crate::style::{StyleAttr, StyleLayer, StyleSpan};
use crate::theme::{CursorGlyph, ThemeOverlay};
use crate::{CellFlags, CursorPlacement, Frame};

/// Snapshot of everything the compositor reads.
#[derive(Debug, Clone, Copy)]
pub struct ComposeInput<'a> {
    pub buffer: &'a Buffer,
    pub viewport: Viewport,
    pub cursor: Position,
    pub cursor_visible: bool,
    pub mode: Mode,
    pub selection: Option<Selection>,
    /// Gutter cells (0 hides line numbers).
    pub gutter_width: usize,
    /// Typewriter focus band; `None` disables dimming.
    pub focus_lines: Option<usize>,
}

pub fn compose_frame(input: &ComposeInput<'_>, theme: &dyn ThemeOverlay) -> Frame {
    let vp = input.viewport;
    let width = clamp_u16(vp.cols);
    let height = clamp_u16(vp.rows);
    let mut frame = Frame::new(width, height);
    let mut layer = StyleLayer::new();
    let gutter = input.gutter_width.min(vp.cols);
    let selection = input.selection.filter(|s| !s.is_empty());

    for y in 0..height {
        let line_idx = vp.scroll_row + y as usize;
        if line_idx >= input.buffer.line_count() {
            frame.set_cluster(0, y, "~", 1, CellFlags::FILLER);
            continue;
        }
        let line = input.buffer.line(line_idx);
        if gutter > 0 {
            paint_gutter(&mut frame, y, line_idx + 1, gutter);
        }
        paint_text(&mut frame, y, &line, gutter, vp.scroll_col);

        // Screen x for a char column, clipped to the text area.
        let screen_x = |col: usize| -> usize { gutter + visual_col(&line, col).saturating_sub(vp.scroll_col) };
        let visible = |col: usize| visual_col(&line, col) >= vp.scroll_col;

        for span in theme.syntax_spans(&line) {
            let start = visual_col(&line, span.start).max(vp.scroll_col);
            let end = visual_col(&line, span.end);
            if end > start {
                layer.push(span_at(y, gutter + start - vp.scroll_col, gutter + end - vp.scroll_col, width, StyleAttr::Syntax(span.tag)));
            }
        }

        if let Some(sel) = selection {
            let line_len = line.chars().count();
            if let Some(ls) = sel.span_on_line(line_idx, line_len) {
                let start = visual_col(&line, ls.start).max(vp.scroll_col);
                let mut end = visual_col(&line, ls.end);
                if ls.includes_break && ls.end == line_len {
                    end += 1;
                }
                if end > start {
                    layer.push(span_at(y, gutter + start - vp.scroll_col, gutter + end - vp.scroll_col, width, StyleAttr::Selection));
                }
            }
        }

        if let Some(focus) = input.focus_lines
            && is_dimmed(line_idx, input.cursor.line, focus)
        {
            layer.push(span_at(y, 0, width as usize, width, StyleAttr::Dim));
        }

        if input.cursor_visible && line_idx == input.cursor.line && visible(input.cursor.col) {
            let x = screen_x(input.cursor.col);
            if x < width as usize {
                let under = line.chars().nth(input.cursor.col);
                let glyph = theme.cursor_glyph(input.mode, under);
                let cell_w = under.map(char_width).unwrap_or(1).max(1);
                let attr = match glyph {
                    CursorGlyph::Block => StyleAttr::BlockCursor,
                    CursorGlyph::Bar => StyleAttr::BarCursor,
                };
                layer.push(span_at(y, x, x + cell_w, width, attr));
                frame.cursor = Some(CursorPlacement {
                    x: x as u16,
                    y,
                    glyph,
                });
            }
        }
    }
    layer.apply(&mut frame);
    tracing::trace!(target: "render", width, height, spans = layer.spans.len(), "compose_frame");
    frame
}

fn clamp_u16(v: usize) -> u16 {
    v.min(u16::MAX as usize) as u16
}

fn span_at(row: u16, start: usize, end: usize, width: u16, attr: StyleAttr) -> StyleSpan {
    StyleSpan {
        row,
        start_col: clamp_u16(start).min(width),
        end_col: clamp_u16(end).min(width),
        attr,
    }
}

fn paint_gutter(frame: &mut Frame, y: u16, number: usize, gutter: usize) {
    let label = format!("{:>w$} ", number, w = gutter - 1);
    for (x, ch) in label.chars().take(gutter).enumerate() {
        frame.set_cluster(x as u16, y, &ch.to_string(), 1, CellFlags::GUTTER);
    }
}

fn paint_text(frame: &mut Frame, y: u16, line: &str, gutter: usize, scroll_col: usize) {
    let width = frame.width as usize;
    let mut vcol = 0usize;
    let mut last_leader: Option<u16> = None;
    for ch in line.chars() {
        let w = char_width(ch);
        if w == 0 {
            if let Some(x) = last_leader {
                frame.extend_cluster(x, y, ch);
            }
            continue;
        }
        let start = vcol;
        vcol += w;
        if vcol <= scroll_col {
            continue;
        }
        if start < scroll_col {
            // wide char cut by the left edge: show blanks for the visible part
            last_leader = None;
            continue;
        }
        let x = gutter + start - scroll_col;
        if x >= width {
            break;
        }
        if x + w > width {
            // does not fit at the right edge
            frame.set_cluster(x as u16, y, " ", 1, CellFlags::empty());
            break;
        }
        let shown = if ch.is_control() { ' ' } else { ch };
        frame.set_cluster(x as u16, y, &shown.to_string(), w as u16, CellFlags::empty());
        last_leader = Some(x as u16);
    }
}
