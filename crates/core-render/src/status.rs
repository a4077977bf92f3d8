//! Status line and message line composition.
//!
//! Two stages, as with the text area:
//! 1. `compose_status` produces an ordered vector of `StatusSegment` items.
//! 2. `format_status` renders them into a string of exactly `width` columns:
//!    `" NAV | notes.md [+] | 12:5"` on the left, `"340 words | TYPEWRITER "`
//!    on the right, blank fill in between. When space runs out the right side
//!    is dropped first, then the left side is truncated.

use core_state::Mode;
use core_text::char_width;
use core_text::width::str_width;

/// What the status line needs to know.
#[derive(Debug, Clone)]
pub struct StatusContext<'a> {
    pub mode: Mode,
    pub file_name: &'a str,
    pub dirty: bool,
    pub line: usize, // 0-based
    pub col: usize,  // 0-based char column
    pub word_count: usize,
    pub typewriter: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    Mode(&'static str),
    FileName { name: &'a str, dirty: bool },
    Position { line_1: usize, col_1: usize },
    Words(usize),
    Typewriter,
}

impl StatusSegment<'_> {
    fn is_right(&self) -> bool {
        matches!(self, StatusSegment::Words(_) | StatusSegment::Typewriter)
    }

    fn text(&self) -> String {
        match self {
            StatusSegment::Mode(m) => (*m).to_string(),
            StatusSegment::FileName { name, dirty } => {
                if *dirty {
                    format!("{name} [+]")
                } else {
                    (*name).to_string()
                }
            }
            StatusSegment::Position { line_1, col_1 } => format!("{line_1}:{col_1}"),
            StatusSegment::Words(n) if *n == 1 => "1 word".to_string(),
            StatusSegment::Words(n) => format!("{n} words"),
            StatusSegment::Typewriter => "TYPEWRITER".to_string(),
        }
    }
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let mut out = Vec::with_capacity(5);
    out.push(StatusSegment::Mode(ctx.mode.label()));
    out.push(StatusSegment::FileName {
        name: ctx.file_name,
        dirty: ctx.dirty,
    });
    out.push(StatusSegment::Position {
        line_1: ctx.line + 1,
        col_1: ctx.col + 1,
    });
    out.push(StatusSegment::Words(ctx.word_count));
    if ctx.typewriter {
        out.push(StatusSegment::Typewriter);
    }
    out
}

pub fn format_status(segments: &[StatusSegment<'_>], width: usize) -> String {
    let join = |right: bool| -> String {
        segments
            .iter()
            .filter(|s| s.is_right() == right)
            .map(StatusSegment::text)
            .collect::<Vec<_>>()
            .join(" | ")
    };
    let left = format!(" {}", join(false));
    let right = format!("{} ", join(true));
    let lw = str_width(&left);
    let rw = str_width(&right);
    if lw + 1 + rw <= width {
        let mut s = left;
        s.push_str(&" ".repeat(width - lw - rw));
        s.push_str(&right);
        s
    } else {
        fit_width(&left, width)
    }
}

/// Message line: prompt or ephemeral text fitted to `width` columns.
pub fn format_message(text: &str, width: usize) -> String {
    fit_width(text, width)
}

/// Truncate or pad `s` to exactly `width` display columns.
pub fn fit_width(s: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0usize;
    for ch in s.chars() {
        let w = char_width(ch);
        if used + w > width {
            break;
        }
        out.push(if ch.is_control() { ' ' } else { ch });
        used += w;
    }
    out.push_str(&" ".repeat(width - used));
    out
}
