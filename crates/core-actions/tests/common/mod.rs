#![allow(dead_code)] // Shared across several integration tests; each test binary uses a subset of helpers.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Instant;

use core_actions::{ConfirmChoice, ConfirmProvider, EditorSession, FileIo, Host, StatusSink};
use core_config::{Config, ConfigFile};
use core_events::{Event, KeyCode, KeyEvent, KeyModifiers};
use core_text::Position;

/// In-memory file store.
#[derive(Clone, Default)]
pub struct MemFiles {
    pub files: Rc<RefCell<HashMap<PathBuf, String>>>,
    pub fail_writes: Rc<Cell<bool>>,
}

impl MemFiles {
    pub fn get(&self, path: &str) -> Option<String> {
        self.files.borrow().get(Path::new(path)).cloned()
    }

    pub fn put(&self, path: &str, text: &str) {
        self.files.borrow_mut().insert(PathBuf::from(path), text.to_string());
    }
}

impl FileIo for MemFiles {
    fn read(&mut self, path: &Path) -> io::Result<String> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn write(&mut self, path: &Path, text: &str) -> io::Result<()> {
        if self.fail_writes.get() {
            return Err(io::Error::other("disk full"));
        }
        self.files.borrow_mut().insert(path.to_path_buf(), text.to_string());
        Ok(())
    }
}

/// Answers confirmations from a queue (Cancel when empty) and records the questions.
#[derive(Clone, Default)]
pub struct ScriptedConfirm {
    pub answers: Rc<RefCell<VecDeque<ConfirmChoice>>>,
    pub asked: Rc<RefCell<Vec<String>>>,
}

impl ConfirmProvider for ScriptedConfirm {
    fn confirm(&mut self, message: &str) -> ConfirmChoice {
        self.asked.borrow_mut().push(message.to_string());
        self.answers.borrow_mut().pop_front().unwrap_or(ConfirmChoice::Cancel)
    }
}

/// Records `(is_error, text)` for every message.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub seen: Rc<RefCell<Vec<(bool, String)>>>,
}

impl StatusSink for RecordingSink {
    fn show_message(&mut self, text: &str) {
        self.seen.borrow_mut().push((false, text.to_string()));
    }
    fn show_error(&mut self, text: &str) {
        self.seen.borrow_mut().push((true, text.to_string()));
    }
}

pub struct Harness {
    pub session: EditorSession,
    pub files: MemFiles,
    pub confirm: ScriptedConfirm,
    pub sink: RecordingSink,
    pub t0: Instant,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(ConfigFile::default())
    }

    pub fn with_config(file: ConfigFile) -> Self {
        let files = MemFiles::default();
        let confirm = ScriptedConfirm::default();
        let sink = RecordingSink::default();
        let host = Host::new(Box::new(files.clone()), Box::new(confirm.clone()))
            .with_status_sink(Box::new(sink.clone()));
        let t0 = Instant::now();
        let session = EditorSession::new(Config::from_file(file, None), host, t0);
        Self {
            session,
            files,
            confirm,
            sink,
            t0,
        }
    }

    /// Harness with `text` opened from `/mem/doc.txt`.
    pub fn with_text(text: &str) -> Self {
        let mut h = Self::new();
        h.open(text);
        h
    }

    pub fn open(&mut self, text: &str) {
        self.files.put("/mem/doc.txt", text);
        self.session.open_initial(Path::new("/mem/doc.txt"));
    }

    pub fn key(&mut self, key: KeyEvent) {
        self.session.handle_event(Event::Key(key));
    }

    pub fn keys(&mut self, keys: &[KeyEvent]) {
        for k in keys {
            self.key(*k);
        }
    }

    pub fn press(&mut self, code: KeyCode) {
        self.key(KeyEvent::plain(code));
    }

    pub fn shift(&mut self, code: KeyCode) {
        self.key(KeyEvent::new(code, KeyModifiers::SHIFT));
    }

    pub fn ctrl(&mut self, c: char) {
        self.key(KeyEvent::ctrl(c));
    }

    /// Type characters one by one (`\n` becomes Enter).
    pub fn type_str(&mut self, text: &str) {
        self.session.type_text(text);
    }

    pub fn answer(&self, choice: ConfirmChoice) {
        self.confirm.answers.borrow_mut().push_back(choice);
    }

    pub fn lines(&self) -> Vec<String> {
        self.session.state().buffer.lines().collect()
    }

    pub fn cursor(&self) -> Position {
        self.session.model().view().cursor
    }

    pub fn message(&self) -> Option<String> {
        self.session
            .state()
            .ephemeral_status
            .as_ref()
            .map(|m| m.text.clone())
    }

    pub fn last_error(&self) -> Option<String> {
        self.sink
            .seen
            .borrow()
            .iter()
            .rev()
            .find(|(err, _)| *err)
            .map(|(_, t)| t.clone())
    }
}
