//! Screen painter.
//!
//! Translates a composed `Screen` into queued crossterm commands and
//! flushes once per frame. Rows identical to the previous frame are skipped;
//! a size change or `invalidate()` forces a full repaint.
//!
//! Leaders are grouped into runs of equal style so one styled print covers
//! many cells. Continuation cells never print.

use std::io::{self, Write};

use core_render::{Cell, CellFlags, CursorGlyph, Screen, StyleTag};
use crossterm::{
    cursor::{Hide, MoveTo, SetCursorStyle, Show},
    queue,
    style::{Attribute, Color, ContentStyle, PrintStyledContent, StyledContent},
};

#[derive(Debug, Default)]
pub struct Painter {
    rows: Vec<Vec<Cell>>,
    status: Option<String>,
    message: Option<(String, bool)>,
    size: (u16, u16),
}

impl Painter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame so the next paint redraws everything.
    pub fn invalidate(&mut self) {
        self.rows.clear();
        self.status = None;
        self.message = None;
    }

    /// Paint `screen` to `out`. Returns the number of screen rows written.
    pub fn paint<W: Write>(&mut self, out: &mut W, screen: &Screen) -> io::Result<usize> {
        let size = (screen.text.width, screen.text.height);
        if size != self.size {
            self.invalidate();
            self.size = size;
        }
        queue!(out, Hide)?;
        let mut painted = 0usize;
        let width = screen.text.width as usize;
        for y in 0..screen.text.height {
            let start = y as usize * width;
            let row = &screen.text.cells[start..start + width];
            if self.rows.get(y as usize).is_some_and(|prev| prev.as_slice() == row) {
                continue;
            }
            queue!(out, MoveTo(0, y))?;
            paint_row(out, row)?;
            painted += 1;
        }
        self.rows = (0..screen.text.height as usize)
            .map(|y| screen.text.cells[y * width..(y + 1) * width].to_vec())
            .collect();

        if let (Some(row), Some(status)) = (screen.status_row, &screen.status)
            && self.status.as_ref() != Some(status)
        {
            let mut style = ContentStyle::new();
            style.attributes.set(Attribute::Reverse);
            queue!(out, MoveTo(0, row), PrintStyledContent(StyledContent::new(style, status.as_str())))?;
            painted += 1;
        }
        self.status = screen.status.clone();

        if let (Some(row), Some(message)) = (screen.message_row, &screen.message) {
            let current = (message.clone(), screen.message_is_error);
            if self.message.as_ref() != Some(&current) {
                let mut style = ContentStyle::new();
                if screen.message_is_error {
                    style.foreground_color = Some(Color::Red);
                }
                queue!(out, MoveTo(0, row), PrintStyledContent(StyledContent::new(style, message.as_str())))?;
                painted += 1;
            }
            self.message = Some(current);
        }

        place_cursor(out, screen)?;
        out.flush()?;
        tracing::trace!(target: "render", painted, "frame_painted");
        Ok(painted)
    }
}

fn paint_row<W: Write>(out: &mut W, row: &[Cell]) -> io::Result<()> {
    let mut run = String::new();
    let mut run_style: Option<ContentStyle> = None;
    for cell in row.iter().filter(|c| c.is_leader()) {
        let style = cell_style(cell);
        if run_style.is_some_and(|s| s != style) {
            flush_run(out, &mut run, run_style)?;
        }
        run_style = Some(style);
        run.push_str(cell.cluster());
    }
    flush_run(out, &mut run, run_style)
}

fn flush_run<W: Write>(out: &mut W, run: &mut String, style: Option<ContentStyle>) -> io::Result<()> {
    if let Some(style) = style
        && !run.is_empty()
    {
        queue!(out, PrintStyledContent(StyledContent::new(style, run.as_str())))?;
    }
    run.clear();
    Ok(())
}

/// Terminal style for one cell: theme tag colors first, then state flags.
pub fn cell_style(cell: &Cell) -> ContentStyle {
    let mut style = ContentStyle::new();
    match cell.style {
        Some(StyleTag::HEADING) => {
            style.foreground_color = Some(Color::Cyan);
            style.attributes.set(Attribute::Bold);
        }
        Some(StyleTag::EMPHASIS) => style.attributes.set(Attribute::Italic),
        Some(StyleTag::CODE) => style.foreground_color = Some(Color::Yellow),
        Some(StyleTag::QUOTE) => {
            style.foreground_color = Some(Color::Green);
            style.attributes.set(Attribute::Italic);
        }
        _ => {}
    }
    let flags = cell.flags;
    if flags.intersects(CellFlags::GUTTER | CellFlags::FILLER) {
        style.foreground_color = Some(Color::DarkGrey);
    }
    if flags.contains(CellFlags::DIM) {
        style.attributes.set(Attribute::Dim);
    }
    if flags.contains(CellFlags::SELECTED) {
        style.background_color = Some(Color::DarkBlue);
    }
    if flags.contains(CellFlags::REVERSE) {
        style.attributes.set(Attribute::Reverse);
    }
    style
}

/// The block cursor is drawn in software; the hardware cursor is only shown
/// as a bar in the text or on the message line while a prompt is open.
fn place_cursor<W: Write>(out: &mut W, screen: &Screen) -> io::Result<()> {
    if let (Some(col), Some(row)) = (screen.message_cursor, screen.message_row) {
        queue!(out, MoveTo(col, row), SetCursorStyle::SteadyBar, Show)?;
        return Ok(());
    }
    match screen.text.cursor {
        Some(c) if c.glyph == CursorGlyph::Bar => {
            queue!(out, MoveTo(c.x, c.y), SetCursorStyle::SteadyBar, Show)?;
        }
        _ => queue!(out, Hide)?,
    }
    Ok(())
}
