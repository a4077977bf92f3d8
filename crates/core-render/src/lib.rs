//! Rendering primitives and frame composition.
//!
//! The compositor is a pure function from editor state to a grid of cells;
//! painting the grid to a terminal is an adapter's job (`core-terminal`).
//!
//! `Cell` stores the full cluster for leader cells along with its visual
//! width; continuation cells (width==0) occupy the remaining columns of a
//! wide cluster and never print text.
//!
//! Invariants:
//! - Leader: width >= 1, `cluster` non-empty.
//! - Continuation: width == 0, `cluster` empty.
//! - Continuations immediately follow their leader horizontally; no gaps.
//! - Every row is exactly `width` cells.
//! - Styling flags applied over spans (`apply_flags_span`) mark leader and
//!   continuations, but painting derives printable content solely from leaders.

use bitflags::bitflags;

pub mod compose;
pub mod status;
pub mod style;
pub mod theme;

pub use compose::{ComposeInput, compose_frame};
pub use status::{StatusContext, compose_status, format_message, format_status};
pub use style::{StyleAttr, StyleLayer, StyleSpan, StyleTag};
pub use theme::{CursorGlyph, MarkdownTheme, PlainTheme, SyntaxSpan, ThemeOverlay};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CellFlags: u8 {
        const REVERSE  = 0b0000_0001; // reverse-video (software block cursor)
        const CURSOR   = 0b0000_0010; // cell is under the cursor
        const SELECTED = 0b0000_0100;
        const DIM      = 0b0000_1000; // outside the typewriter focus band
        const GUTTER   = 0b0001_0000; // line number column
        const FILLER   = 0b0010_0000; // `~` row past end of document
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Full cluster string (leader cells only). Empty for continuation cells.
    pub cluster: String,
    /// Visual width in terminal columns. `0` designates a continuation cell.
    pub width: u8,
    pub flags: CellFlags,
    pub style: Option<StyleTag>,
}

impl Cell {
    #[inline]
    pub fn leader(cluster: &str, width: u16, flags: CellFlags) -> Self {
        Self {
            cluster: cluster.to_string(),
            width: width.clamp(1, u8::MAX as u16) as u8,
            flags,
            style: None,
        }
    }
    #[inline]
    pub fn continuation(flags: CellFlags) -> Self {
        Self {
            cluster: String::new(),
            width: 0,
            flags,
            style: None,
        }
    }
    #[inline]
    pub fn is_leader(&self) -> bool {
        self.width > 0
    }
    #[inline]
    pub fn visual_width(&self) -> u16 {
        self.width as u16
    }
    #[inline]
    pub fn cluster(&self) -> &str {
        &self.cluster
    }
}

impl Default for Cell {
    fn default() -> Self {
        // Blank areas are single space leader cells.
        Cell {
            cluster: " ".to_string(),
            width: 1,
            flags: CellFlags::empty(),
            style: None,
        }
    }
}

/// Where the painter should place the hardware cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPlacement {
    pub x: u16,
    pub y: u16,
    pub glyph: CursorGlyph,
}

#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<Cell>,
    pub cursor: Option<CursorPlacement>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width as usize) * (height as usize)],
            cursor: None,
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Set a full cluster at (x,y) and populate continuation cells for its width.
    pub fn set_cluster(&mut self, x: u16, y: u16, cluster: &str, width: u16, flags: CellFlags) {
        if x >= self.width || y >= self.height {
            return;
        }
        let w = width.max(1).min(self.width - x);
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = Cell::leader(cluster, w, flags);
        }
        for dx in 1..w {
            if let Some(c_idx) = self.index(x + dx, y) {
                self.cells[c_idx] = Cell::continuation(flags);
            }
        }
    }

    /// Append a zero-width char to the cluster of the leader at (x,y).
    pub fn extend_cluster(&mut self, x: u16, y: u16, ch: char) {
        if let Some(cell) = self.cell_mut(x, y)
            && cell.is_leader()
        {
            cell.cluster.push(ch);
        }
    }

    /// Apply additional flags over an existing span (leader + continuations).
    pub fn apply_flags_span(&mut self, x: u16, y: u16, span_width: u16, flags: CellFlags) {
        let span = span_width.min(self.width.saturating_sub(x));
        for dx in 0..span {
            if let Some(idx) = self.index(x + dx, y) {
                self.cells[idx].flags |= flags;
            }
        }
    }

    pub fn apply_style_span(&mut self, x: u16, y: u16, span_width: u16, tag: StyleTag) {
        let span = span_width.min(self.width.saturating_sub(x));
        for dx in 0..span {
            if let Some(idx) = self.index(x + dx, y) {
                self.cells[idx].style = Some(tag);
            }
        }
    }

    /// Iterate leader cells of a row, yielding (cell, start_x).
    pub fn row_leaders(&self, y: u16) -> impl Iterator<Item = (&Cell, u16)> + '_ {
        let width = self.width;
        let start = y as usize * width as usize;
        let mut x = 0u16;
        std::iter::from_fn(move || {
            if y >= self.height {
                return None;
            }
            while x < width {
                let cell = &self.cells[start + x as usize];
                if cell.is_leader() {
                    let out = (cell, x);
                    x = x.saturating_add(cell.visual_width());
                    return Some(out);
                }
                x += 1;
            }
            None
        })
    }

    /// Leader cluster strings for a row.
    pub fn line_clusters(&self, y: u16) -> Vec<&str> {
        self.row_leaders(y).map(|(c, _)| c.cluster()).collect()
    }

    /// Row content as printed (leaders concatenated).
    pub fn row_text(&self, y: u16) -> String {
        self.row_leaders(y).map(|(c, _)| c.cluster()).collect()
    }
}

/// Everything the painter needs for one screen refresh.
#[derive(Debug, Clone)]
pub struct Screen {
    pub text: Frame,
    /// Status line padded to the screen width (absent in distraction-free mode).
    pub status: Option<String>,
    /// Message line padded to the screen width.
    pub message: Option<String>,
    pub message_is_error: bool,
    /// Screen row of the status line and message line.
    pub status_row: Option<u16>,
    pub message_row: Option<u16>,
    /// Column of the hardware cursor on the message line while a prompt is open.
    pub message_cursor: Option<u16>,
}
