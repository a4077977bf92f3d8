//! Editor session: owns the model, configuration and collaborators, and
//! turns `Event`s into state changes.
//!
//! Time only advances through `Event::Tick(now)`; the session keeps the
//! last instant it saw and stamps messages with it. Each tick may expire the
//! ephemeral message, flip the cursor blink phase and run auto-save.
//! After every event the layout is recomputed from the last known screen
//! size and the viewport is scrolled to the cursor.

use std::io;
use std::path::Path;
use std::time::Instant;

use core_config::Config;
use core_events::{Event, KeyEvent};
use core_model::{EditorModel, Layout, Typewriter};
use core_render::{
    ComposeInput, Screen, StatusContext, ThemeOverlay, compose_frame, compose_status,
    format_message, format_status,
};
use core_state::{ClipboardProvider, EditorState, LineEnding, MessageLevel};
use core_text::{Buffer, visual_col};

use crate::dispatcher::{DispatchContext, DispatchResult, dispatch};
use crate::host::Host;
use crate::io_ops::{FileError, load_document, save_document};
use crate::key_translator::translate_key;
use crate::Action;

pub struct EditorSession {
    model: EditorModel,
    config: Config,
    host: Host,
    typewriter: Typewriter,
    cols: u16,
    rows: u16,
    clock: Instant,
    last_autosave: Instant,
    last_blink: Instant,
    quit: bool,
}

impl EditorSession {
    pub fn new(config: Config, host: Host, now: Instant) -> Self {
        let mut state = EditorState::new(Buffer::new(""));
        state.set_undo_limits(config.file.undo.depth, config.file.undo.coalesce_inserts);
        state.typewriter = config.file.typewriter.enabled;
        state.line_numbers = config.file.editor.line_numbers;
        let typewriter = Typewriter {
            position: config.effective_typewriter_position,
            focus_lines: config.file.typewriter.focus_lines,
        };
        let mut session = Self {
            model: EditorModel::new(state),
            config,
            host,
            typewriter,
            cols: 80,
            rows: 24,
            clock: now,
            last_autosave: now,
            last_blink: now,
            quit: false,
        };
        session.relayout();
        tracing::info!(target: "actions.session", "session_started");
        session
    }

    pub fn set_clipboard_provider(&mut self, provider: Box<dyn ClipboardProvider>) {
        self.model.state_mut().clipboard.set_provider(Some(provider));
    }

    pub fn model(&self) -> &EditorModel {
        &self.model
    }

    pub fn state(&self) -> &EditorState {
        self.model.state()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn screen_size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Open `path` at startup. A missing file binds the path to an empty
    /// document so the first save creates it.
    pub fn open_initial(&mut self, path: &Path) {
        let result = load_document(&mut *self.host.files, path);
        let (state, view) = self.model.split();
        let mut ctx = DispatchContext {
            host: &mut self.host,
            config: &self.config,
            now: self.clock,
        };
        match result {
            Ok(doc) => {
                let name = doc.buffer.name.clone();
                state.replace_document(
                    doc.buffer,
                    Some(doc.path),
                    doc.line_ending,
                    doc.had_trailing_newline,
                );
                ctx.info(state, format!("Opened: {name}"));
            }
            Err(FileError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                state.replace_document(Buffer::new(""), Some(path.to_path_buf()), LineEnding::Lf, false);
                state.buffer.name = state.display_name();
                let name = state.display_name();
                ctx.info(state, format!("New file: {name}"));
            }
            Err(e) => ctx.error(state, format!("Open failed: {e}")),
        }
        view.cursor = core_text::Position::origin();
        view.viewport.scroll_row = 0;
        view.viewport.scroll_col = 0;
        self.relayout();
    }

    pub fn handle_event(&mut self, event: Event) -> DispatchResult {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(text) => {
                self.wake_cursor();
                if self.model.state().prompt.is_active() {
                    self.model.state_mut().prompt.push_str(&text);
                    DispatchResult::dirty()
                } else {
                    self.apply(Action::PasteText(text))
                }
            }
            Event::Resize { cols, rows } => self.resize(cols, rows),
            Event::Tick(now) => self.tick(now),
            Event::Shutdown => {
                tracing::info!(target: "actions.session", "shutdown_event");
                self.quit = true;
                DispatchResult::quit()
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> DispatchResult {
        let woke = self.wake_cursor();
        let state = self.model.state();
        match translate_key(state.mode, state.prompt.is_active(), &key) {
            Some(action) => {
                let mut result = self.apply(action);
                result.dirty |= woke;
                result
            }
            None => {
                tracing::trace!(target: "actions.session", key = %key, "unmapped_key");
                if woke { DispatchResult::dirty() } else { DispatchResult::clean() }
            }
        }
    }

    /// Dispatch one action and bring the layout up to date.
    pub fn apply(&mut self, action: Action) -> DispatchResult {
        let mut ctx = DispatchContext {
            host: &mut self.host,
            config: &self.config,
            now: self.clock,
        };
        let result = dispatch(action, &mut self.model, &mut ctx);
        if result.quit {
            self.quit = true;
        }
        self.relayout();
        result
    }

    /// Convenience for typing a string of characters through the key path.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            let key = if ch == '\n' {
                KeyEvent::plain(core_events::KeyCode::Enter)
            } else {
                KeyEvent::ch(ch)
            };
            self.handle_key(key);
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) -> DispatchResult {
        self.cols = cols;
        self.rows = rows;
        tracing::debug!(target: "actions.session", cols, rows, "resize");
        self.relayout();
        DispatchResult::dirty()
    }

    /// Advance the session clock. Returns dirty when anything visible changed.
    pub fn tick(&mut self, now: Instant) -> DispatchResult {
        self.clock = now;
        let mut dirty = self.model.state_mut().tick_ephemeral(now);
        if let Some(interval) = self.config.blink_interval()
            && now.duration_since(self.last_blink) >= interval
        {
            let state = self.model.state_mut();
            state.cursor_visible = !state.cursor_visible;
            self.last_blink = now;
            dirty = true;
        }
        if let Some(interval) = self.config.autosave_interval()
            && now.duration_since(self.last_autosave) >= interval
        {
            self.last_autosave = now;
            dirty |= self.autosave();
        }
        if dirty { DispatchResult::dirty() } else { DispatchResult::clean() }
    }

    /// Save when there is something to save and somewhere to save it.
    /// Returns true when a message was raised.
    fn autosave(&mut self) -> bool {
        let state = self.model.state_mut();
        if !state.is_dirty() || state.file_name.is_none() {
            return false;
        }
        match save_document(&mut *self.host.files, state, None) {
            Ok(path) => {
                tracing::debug!(target: "actions.session", path = %path.display(), "autosaved");
                false
            }
            Err(e) => {
                let mut ctx = DispatchContext {
                    host: &mut self.host,
                    config: &self.config,
                    now: self.clock,
                };
                ctx.error(state, format!("Auto-save failed: {e}"));
                true
            }
        }
    }

    /// Any key shows the cursor and restarts the blink phase.
    fn wake_cursor(&mut self) -> bool {
        self.last_blink = self.clock;
        let state = self.model.state_mut();
        let was_hidden = !state.cursor_visible;
        state.cursor_visible = true;
        was_hidden
    }

    fn layout(&self) -> Layout {
        Layout::for_screen(self.cols, self.rows, self.model.state().distraction_free)
    }

    fn relayout(&mut self) {
        let layout = self.layout();
        let text_rows = layout.text_rows();
        self.model.view_mut().resize(text_rows, layout.text_cols());
        if let Some(row) = self
            .config
            .recompute_after_resize(u16::try_from(text_rows).unwrap_or(u16::MAX))
        {
            tracing::trace!(target: "actions.session", row, "typewriter_row_changed");
        }
        self.typewriter.position = self.config.effective_typewriter_position;
        self.model.scroll(&self.typewriter);
    }

    /// Compose the whole screen for the painter.
    pub fn render(&self, theme: &dyn ThemeOverlay) -> Screen {
        let layout = self.layout();
        let state = self.model.state();
        let view = self.model.view();
        let prompt = state.prompt.display();
        let input = ComposeInput {
            buffer: &state.buffer,
            viewport: view.viewport,
            cursor: view.cursor,
            cursor_visible: state.cursor_visible && prompt.is_none(),
            mode: state.mode,
            selection: state.selection.get(),
            gutter_width: self.model.gutter_width(),
            focus_lines: state.typewriter.then_some(self.typewriter.focus_lines),
        };
        let text = compose_frame(&input, theme);

        let status = layout.status.map(|region| {
            let name = state.display_name();
            let ctx = StatusContext {
                mode: state.mode,
                file_name: &name,
                dirty: state.is_dirty(),
                line: view.cursor.line,
                col: view.cursor.col,
                word_count: state.buffer.word_count(),
                typewriter: state.typewriter,
            };
            format_status(&compose_status(&ctx), region.width as usize)
        });

        let (message_text, message_is_error) = match (&prompt, &state.ephemeral_status) {
            (Some(p), _) => (p.clone(), false),
            (None, Some(m)) => (m.text.clone(), m.level == MessageLevel::Error),
            (None, None) => (String::new(), false),
        };
        let message = layout
            .message
            .map(|region| format_message(&message_text, region.width as usize));
        let message_cursor = match (&prompt, layout.message) {
            (Some(p), Some(region)) => {
                let col = visual_col(p, p.chars().count()).min(region.width.saturating_sub(1) as usize);
                Some(col as u16)
            }
            _ => None,
        };

        Screen {
            text,
            status,
            message,
            message_is_error,
            status_row: layout.status.map(|r| r.y),
            message_row: layout.message.map(|r| r.y),
            message_cursor,
        }
    }
}
