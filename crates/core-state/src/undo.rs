use core_text::{Buffer, Position};
use tracing::trace;

/// Default number of frames retained in undo history.
pub const DEFAULT_UNDO_DEPTH: usize = 100;

/// Pre-edit capture of the document and cursor. Buffer clones share rope
/// structure, so a frame costs O(1) until the live document diverges.
#[derive(Clone)]
pub struct UndoFrame {
    pub buffer: Buffer,
    pub cursor: Position,
}

/// Insert run state tracking for optional coalescing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertRun {
    Inactive,
    Active { edits: u32 },
}

pub struct UndoEngine {
    undo_stack: Vec<UndoFrame>,
    redo_stack: Vec<UndoFrame>,
    insert_run: InsertRun,
    max_depth: usize,
    coalesce_inserts: bool,
}

impl Default for UndoEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoEngine {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_UNDO_DEPTH, false)
    }

    pub fn with_limits(max_depth: usize, coalesce_inserts: bool) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            insert_run: InsertRun::Inactive,
            max_depth: max_depth.max(1),
            coalesce_inserts,
        }
    }

    pub fn set_limits(&mut self, max_depth: usize, coalesce_inserts: bool) {
        self.max_depth = max_depth.max(1);
        self.coalesce_inserts = coalesce_inserts;
        self.trim();
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
    pub fn insert_run(&self) -> InsertRun {
        self.insert_run
    }
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn trim(&mut self) {
        while self.undo_stack.len() > self.max_depth {
            let _ = self.undo_stack.remove(0);
            trace!(target: "state.undo", max_depth = self.max_depth, "undo_stack_trimmed");
        }
    }

    /// Record the state before a discrete edit. Ends any insert run and clears redo.
    pub fn push_snapshot(&mut self, cursor: Position, buffer: &Buffer) {
        self.insert_run = InsertRun::Inactive;
        self.push_frame(cursor, buffer);
    }

    fn push_frame(&mut self, cursor: Position, buffer: &Buffer) {
        self.undo_stack.push(UndoFrame {
            buffer: buffer.clone(),
            cursor,
        });
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), lines = buffer.line_count(), "push_snapshot");
        self.trim();
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
    }

    /// Record the state before a character insert. With coalescing on, only the
    /// first insert of a run pushes a frame.
    pub fn begin_insert(&mut self, cursor: Position, buffer: &Buffer) {
        if !self.coalesce_inserts {
            self.push_snapshot(cursor, buffer);
            return;
        }
        match &mut self.insert_run {
            InsertRun::Inactive => {
                self.push_frame(cursor, buffer);
                self.insert_run = InsertRun::Active { edits: 1 };
            }
            InsertRun::Active { edits } => *edits += 1,
        }
    }

    pub fn end_insert_run(&mut self) {
        if let InsertRun::Active { edits } = self.insert_run {
            trace!(target: "state.undo", edits, "insert_run_ended");
        }
        self.insert_run = InsertRun::Inactive;
    }

    /// Drop all history (new document or file load).
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.insert_run = InsertRun::Inactive;
    }

    pub fn undo(&mut self, cursor: &mut Position, buffer: &mut Buffer) -> bool {
        self.insert_run = InsertRun::Inactive;
        let Some(last) = self.undo_stack.pop() else {
            return false;
        };
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "undo_pop");
        self.redo_stack.push(UndoFrame {
            buffer: buffer.clone(),
            cursor: *cursor,
        });
        restore(last, cursor, buffer);
        true
    }

    pub fn redo(&mut self, cursor: &mut Position, buffer: &mut Buffer) -> bool {
        self.insert_run = InsertRun::Inactive;
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        trace!(target: "state.undo", redo_depth = self.redo_stack.len(), undo_depth = self.undo_stack.len(), "redo_pop");
        self.undo_stack.push(UndoFrame {
            buffer: buffer.clone(),
            cursor: *cursor,
        });
        self.trim();
        restore(next, cursor, buffer);
        true
    }
}

fn restore(frame: UndoFrame, cursor: &mut Position, buffer: &mut Buffer) {
    let name = std::mem::take(&mut buffer.name);
    *buffer = frame.buffer;
    buffer.name = name;
    buffer.mark_dirty();
    *cursor = buffer.clamp(frame.cursor);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(b: &Buffer) -> String {
        b.to_text()
    }

    #[test]
    fn undo_redo_round_trip() {
        let mut eng = UndoEngine::new();
        let mut buf = Buffer::from_lines("t", ["abc"]);
        let mut cur = Position::new(0, 3);
        eng.push_snapshot(cur, &buf);
        cur = buf.insert_char(0, 3, 'd');
        assert_eq!(text(&buf), "abcd");
        assert!(eng.undo(&mut cur, &mut buf));
        assert_eq!(text(&buf), "abc");
        assert_eq!(cur, Position::new(0, 3));
        assert!(buf.is_dirty());
        assert!(eng.redo(&mut cur, &mut buf));
        assert_eq!(text(&buf), "abcd");
        assert_eq!(cur, Position::new(0, 4));
    }

    #[test]
    fn underflow_is_noop() {
        let mut eng = UndoEngine::new();
        let mut buf = Buffer::from_lines("t", ["x"]);
        let mut cur = Position::origin();
        assert!(!eng.undo(&mut cur, &mut buf));
        assert!(!eng.redo(&mut cur, &mut buf));
        assert_eq!(text(&buf), "x");
        assert!(!buf.is_dirty());
    }

    #[test]
    fn new_edit_clears_redo() {
        let mut eng = UndoEngine::new();
        let mut buf = Buffer::from_lines("t", ["a"]);
        let mut cur = Position::new(0, 1);
        eng.push_snapshot(cur, &buf);
        cur = buf.insert_char(0, 1, 'b');
        eng.undo(&mut cur, &mut buf);
        assert_eq!(eng.redo_depth(), 1);
        eng.push_snapshot(cur, &buf);
        assert_eq!(eng.redo_depth(), 0);
    }

    #[test]
    fn depth_bound_evicts_oldest() {
        let mut eng = UndoEngine::with_limits(3, false);
        let mut buf = Buffer::from_lines("t", [""]);
        let mut cur = Position::origin();
        for ch in ['a', 'b', 'c', 'd', 'e'] {
            eng.push_snapshot(cur, &buf);
            cur = buf.insert_char(cur.line, cur.col, ch);
        }
        assert_eq!(eng.undo_depth(), 3);
        while eng.undo(&mut cur, &mut buf) {}
        assert_eq!(text(&buf), "ab");
    }

    #[test]
    fn coalesced_run_is_one_frame() {
        let mut eng = UndoEngine::with_limits(10, true);
        let mut buf = Buffer::from_lines("t", [""]);
        let mut cur = Position::origin();
        for ch in "hello".chars() {
            eng.begin_insert(cur, &buf);
            cur = buf.insert_char(cur.line, cur.col, ch);
        }
        assert_eq!(eng.undo_depth(), 1);
        assert_eq!(eng.insert_run(), InsertRun::Active { edits: 5 });
        eng.end_insert_run();
        eng.begin_insert(cur, &buf);
        cur = buf.insert_char(cur.line, cur.col, '!');
        assert_eq!(eng.undo_depth(), 2);
        eng.undo(&mut cur, &mut buf);
        assert_eq!(text(&buf), "hello");
        eng.undo(&mut cur, &mut buf);
        assert_eq!(text(&buf), "");
    }

    #[test]
    fn without_coalescing_every_insert_is_a_frame() {
        let mut eng = UndoEngine::new();
        let mut buf = Buffer::from_lines("t", [""]);
        let mut cur = Position::origin();
        for ch in "abc".chars() {
            eng.begin_insert(cur, &buf);
            cur = buf.insert_char(cur.line, cur.col, ch);
        }
        assert_eq!(eng.undo_depth(), 3);
    }
}
