//! Blocking unsaved-changes dialog on the message line.

use std::cell::Cell;
use std::io::{self, Write, stdout};
use std::rc::Rc;

use core_actions::{ConfirmChoice, ConfirmProvider};
use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_render::status::fit_width;
use crossterm::{
    cursor::MoveTo,
    event::{self, Event as CEvent, KeyEventKind},
    queue,
    style::{Attribute, ContentStyle, PrintStyledContent, StyledContent},
};

use crate::input::convert_key;

/// Asks on the bottom row and waits for s / d / c (or y / n / Esc).
///
/// The dialog draws over whatever the painter left on the message line;
/// `touched()` is raised so the caller can repaint.
#[derive(Debug, Default)]
pub struct TerminalConfirm {
    touched: Rc<Cell<bool>>,
}

impl TerminalConfirm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag set whenever the dialog drew on the screen.
    pub fn touched(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.touched)
    }

    fn ask(&mut self, message: &str) -> io::Result<ConfirmChoice> {
        let (cols, rows) = crossterm::terminal::size()?;
        let text = fit_width(
            &format!("{message} [s]ave / [d]iscard / [c]ancel"),
            cols as usize,
        );
        let mut style = ContentStyle::new();
        style.attributes.set(Attribute::Bold);
        let mut out = stdout();
        queue!(
            out,
            MoveTo(0, rows.saturating_sub(1)),
            PrintStyledContent(StyledContent::new(style, text.as_str()))
        )?;
        out.flush()?;
        self.touched.set(true);
        loop {
            if let CEvent::Key(raw) = event::read()?
                && raw.kind == KeyEventKind::Press
                && let Some(key) = convert_key(&raw)
                && let Some(choice) = choice_for_key(&key)
            {
                return Ok(choice);
            }
        }
    }
}

impl ConfirmProvider for TerminalConfirm {
    fn confirm(&mut self, message: &str) -> ConfirmChoice {
        match self.ask(message) {
            Ok(choice) => {
                tracing::debug!(target: "runtime", ?choice, "confirm_answered");
                choice
            }
            Err(e) => {
                tracing::warn!(target: "runtime", error = %e, "confirm_failed");
                ConfirmChoice::Cancel
            }
        }
    }
}

/// Dialog answer for a key, if it is one.
pub fn choice_for_key(key: &KeyEvent) -> Option<ConfirmChoice> {
    if key.mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT) {
        return None;
    }
    match key.code {
        KeyCode::Char('s' | 'S' | 'y' | 'Y') => Some(ConfirmChoice::Save),
        KeyCode::Char('d' | 'D' | 'n' | 'N') => Some(ConfirmChoice::Discard),
        KeyCode::Char('c' | 'C') | KeyCode::Esc => Some(ConfirmChoice::Cancel),
        _ => None,
    }
}
