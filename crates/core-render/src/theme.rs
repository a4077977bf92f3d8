//! Theme overlay seam.
//!
//! A theme contributes syntax classes per line and chooses the cursor glyph.
//! Colors are not modeled here: cells only carry a `StyleTag`.

use core_state::Mode;

use crate::style::StyleTag;

/// Half-open char range `[start, end)` within one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxSpan {
    pub start: usize,
    pub end: usize,
    pub tag: StyleTag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorGlyph {
    /// Reverse video over the cell under the cursor.
    Block,
    /// Thin bar before the cell under the cursor.
    Bar,
}

pub trait ThemeOverlay {
    fn syntax_spans(&self, line: &str) -> Vec<SyntaxSpan>;
    fn cursor_glyph(&self, mode: Mode, under: Option<char>) -> CursorGlyph;
}

/// No syntax classes; block cursor while navigating, bar while inserting.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTheme;

impl ThemeOverlay for PlainTheme {
    fn syntax_spans(&self, _line: &str) -> Vec<SyntaxSpan> {
        Vec::new()
    }

    fn cursor_glyph(&self, mode: Mode, _under: Option<char>) -> CursorGlyph {
        match mode {
            Mode::Navigation => CursorGlyph::Block,
            Mode::Insert => CursorGlyph::Bar,
        }
    }
}

/// Light markdown classes: headings, block quotes, inline code and
/// `*emphasis*` / `_emphasis_` runs. Line-local only.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownTheme;

impl ThemeOverlay for MarkdownTheme {
    fn syntax_spans(&self, line: &str) -> Vec<SyntaxSpan> {
        let chars: Vec<char> = line.chars().collect();
        let trimmed = line.trim_start();
        if trimmed.starts_with('#') {
            return vec![SyntaxSpan {
                start: 0,
                end: chars.len(),
                tag: StyleTag::HEADING,
            }];
        }
        if trimmed.starts_with('>') {
            return vec![SyntaxSpan {
                start: 0,
                end: chars.len(),
                tag: StyleTag::QUOTE,
            }];
        }
        let mut spans = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            let tag = match c {
                '`' => StyleTag::CODE,
                '*' | '_' => StyleTag::EMPHASIS,
                _ => {
                    i += 1;
                    continue;
                }
            };
            // run of the same delimiter opens the span, the same run closes it
            let mut open = i;
            while open < chars.len() && chars[open] == c {
                open += 1;
            }
            let run = open - i;
            let close = (open..chars.len()).find(|&j| {
                j + run <= chars.len() && chars[j..j + run].iter().all(|&d| d == c)
            });
            match close {
                Some(j) if j > open => {
                    spans.push(SyntaxSpan {
                        start: i,
                        end: j + run,
                        tag,
                    });
                    i = j + run;
                }
                _ => i = open,
            }
        }
        spans
    }

    fn cursor_glyph(&self, mode: Mode, under: Option<char>) -> CursorGlyph {
        PlainTheme.cursor_glyph(mode, under)
    }
}
