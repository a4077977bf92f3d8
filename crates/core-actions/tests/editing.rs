//! Editing behavior driven through the key path.

mod common;

use common::Harness;
use core_actions::{Action, EditKind};
use core_events::{KeyCode, KeyEvent};
use core_state::Mode;
use core_text::Position;
use pretty_assertions::assert_eq;

#[test]
fn insert_comma_inside_a_line() {
    let mut h = Harness::with_text("Hello world");
    h.type_str("ddddd");
    assert_eq!(h.cursor(), Position::new(0, 5));
    h.type_str("i,");
    assert_eq!(h.lines(), vec!["Hello, world"]);
    assert_eq!(h.cursor(), Position::new(0, 6));
    assert!(h.session.state().is_dirty());
}

#[test]
fn backspace_then_join_lines() {
    let mut h = Harness::with_text("abc\ndef");
    h.press(KeyCode::End);
    h.type_str("i");
    h.press(KeyCode::Backspace);
    assert_eq!(h.lines(), vec!["ab", "def"]);
    assert_eq!(h.cursor(), Position::new(0, 2));

    h.press(KeyCode::Down);
    h.press(KeyCode::Home);
    assert_eq!(h.cursor(), Position::new(1, 0));
    h.press(KeyCode::Backspace);
    assert_eq!(h.lines(), vec!["abdef"]);
    assert_eq!(h.cursor(), Position::new(0, 2));
}

#[test]
fn backspace_at_document_start_is_a_no_op() {
    let mut h = Harness::with_text("abc");
    h.type_str("i");
    h.press(KeyCode::Backspace);
    assert_eq!(h.lines(), vec!["abc"]);
    assert_eq!(h.session.state().undo_depth(), 0);
    assert!(!h.session.state().is_dirty());
}

#[test]
fn delete_forward_at_line_end_joins_next_line() {
    let mut h = Harness::with_text("one\ntwo");
    h.press(KeyCode::End);
    h.press(KeyCode::Delete);
    assert_eq!(h.lines(), vec!["onetwo"]);
    assert_eq!(h.cursor(), Position::new(0, 3));
}

#[test]
fn navigation_letters_move_instead_of_inserting() {
    let mut h = Harness::with_text("first\nsecond");
    h.type_str("sdd");
    assert_eq!(h.lines(), vec!["first", "second"]);
    assert_eq!(h.cursor(), Position::new(1, 2));
    assert_eq!(h.session.state().mode, Mode::Navigation);
    h.type_str("wa");
    assert_eq!(h.cursor(), Position::new(0, 1));
    assert!(!h.session.state().is_dirty());
}

#[test]
fn escape_returns_to_navigation() {
    let mut h = Harness::with_text("x");
    h.type_str("i");
    assert_eq!(h.session.state().mode, Mode::Insert);
    h.press(KeyCode::Esc);
    assert_eq!(h.session.state().mode, Mode::Navigation);
    h.type_str("w");
    assert_eq!(h.lines(), vec!["x"]);
}

#[test]
fn enter_splits_and_tab_inserts_spaces() {
    let mut h = Harness::with_text("headbody");
    h.type_str("ddddi\n\t");
    assert_eq!(h.lines(), vec!["head", "    body"]);
    assert_eq!(h.cursor(), Position::new(1, 4));
}

#[test]
fn open_line_below_enters_insert_mode() {
    let mut h = Harness::with_text("alpha\nbeta");
    h.type_str("o");
    assert_eq!(h.session.state().mode, Mode::Insert);
    assert_eq!(h.lines(), vec!["alpha", "", "beta"]);
    assert_eq!(h.cursor(), Position::new(1, 0));
    h.type_str("mid");
    assert_eq!(h.lines(), vec!["alpha", "mid", "beta"]);
}

#[test]
fn delete_line_keeps_cursor_in_range() {
    let mut h = Harness::with_text("a\nbb");
    h.type_str("sX");
    assert_eq!(h.lines(), vec!["a"]);
    assert_eq!(h.cursor(), Position::new(0, 0));
    h.type_str("X");
    assert_eq!(h.lines(), vec![""]);
}

#[test]
fn vertical_motion_remembers_visual_column() {
    let mut h = Harness::with_text("long line\nab\nanother line");
    h.type_str("dddddddd");
    assert_eq!(h.cursor(), Position::new(0, 8));
    h.type_str("s");
    assert_eq!(h.cursor(), Position::new(1, 2));
    h.type_str("s");
    assert_eq!(h.cursor(), Position::new(2, 8));
}

#[test]
fn undo_and_redo_each_keystroke() {
    let mut h = Harness::with_text("");
    h.type_str("iabc");
    assert_eq!(h.lines(), vec!["abc"]);
    for expected in ["ab", "a", ""] {
        h.ctrl('z');
        assert_eq!(h.lines(), vec![expected]);
    }
    // nothing left: silent
    h.ctrl('z');
    assert_eq!(h.lines(), vec![""]);
    for expected in ["a", "ab", "abc"] {
        h.ctrl('y');
        assert_eq!(h.lines(), vec![expected]);
    }
    assert_eq!(h.cursor(), Position::new(0, 3));
}

#[test]
fn coalesced_inserts_undo_as_one_step() {
    let mut file = core_config::ConfigFile::default();
    file.undo.coalesce_inserts = true;
    let mut h = Harness::with_config(file);
    h.open("x");
    h.type_str("iabc");
    h.press(KeyCode::Right);
    h.type_str("d");
    assert_eq!(h.lines(), vec!["abcxd"]);
    h.ctrl('z');
    assert_eq!(h.lines(), vec!["abcx"]);
    h.ctrl('z');
    assert_eq!(h.lines(), vec!["x"]);
}

#[test]
fn new_edit_clears_redo() {
    let mut h = Harness::with_text("");
    h.type_str("iab");
    h.ctrl('z');
    h.type_str("c");
    assert_eq!(h.lines(), vec!["ac"]);
    assert_eq!(h.session.state().redo_depth(), 0);
    h.ctrl('y');
    assert_eq!(h.lines(), vec!["ac"]);
}

#[test]
fn typing_replaces_selection() {
    let mut h = Harness::with_text("hello world");
    for _ in 0..5 {
        h.shift(KeyCode::Right);
    }
    h.type_str("iX");
    assert_eq!(h.lines(), vec!["X world"]);
    assert_eq!(h.cursor(), Position::new(0, 1));
    assert!(h.session.state().selection.get().is_none());
    h.ctrl('z');
    assert_eq!(h.lines(), vec!["hello world"]);
}

#[test]
fn backspace_with_selection_only_removes_it() {
    let mut h = Harness::with_text("abcdef");
    h.type_str("dd");
    h.shift(KeyCode::Right);
    h.shift(KeyCode::Right);
    h.type_str("i");
    h.press(KeyCode::Backspace);
    assert_eq!(h.lines(), vec!["abef"]);
    assert_eq!(h.cursor(), Position::new(0, 2));
}

#[test]
fn plain_motion_clears_selection() {
    let mut h = Harness::with_text("abcdef");
    h.shift(KeyCode::Right);
    assert!(h.session.state().selection.get().is_some());
    h.press(KeyCode::Right);
    assert!(h.session.state().selection.get().is_none());
}

#[test]
fn edit_drops_collapsed_selection() {
    let mut h = Harness::with_text("abc");
    h.type_str("i");
    h.shift(KeyCode::Right);
    h.shift(KeyCode::Left);
    h.type_str("X");
    assert_eq!(h.lines(), vec!["Xabc"]);
    assert!(h.session.state().selection.get().is_none());

    h.shift(KeyCode::Right);
    let sel = h.session.state().selection.get().expect("selection");
    assert_eq!(sel.anchor, Position::new(0, 1));
    assert_eq!(sel.active, Position::new(0, 2));
    assert_eq!(h.session.state().selected_text().as_deref(), Some("a"));

    h.ctrl('x');
    assert_eq!(h.lines(), vec!["Xbc"]);
}

#[test]
fn every_edit_clears_selection() {
    let mut h = Harness::with_text("abcdef");
    h.type_str("i");
    for key in [KeyCode::Backspace, KeyCode::Delete, KeyCode::Enter, KeyCode::Tab] {
        h.shift(KeyCode::Right);
        h.shift(KeyCode::Left);
        h.press(key);
        assert!(h.session.state().selection.get().is_none(), "after {key:?}");
    }
}

#[test]
fn select_all_spans_document() {
    let mut h = Harness::with_text("line1\nline22");
    h.ctrl('a');
    let sel = h.session.state().selection.get().expect("selection");
    assert_eq!(sel.anchor, Position::new(0, 0));
    assert_eq!(sel.active, Position::new(1, 6));
    assert_eq!(h.cursor(), Position::new(1, 6));
    assert_eq!(h.message().as_deref(), Some("Selected all text"));
}

#[test]
fn copy_then_paste_uses_internal_clipboard() {
    let mut h = Harness::with_text("one two");
    h.shift(KeyCode::End);
    h.ctrl('c');
    assert_eq!(h.message().as_deref(), Some("Copied to clipboard"));
    h.press(KeyCode::End);
    h.ctrl('v');
    assert_eq!(h.lines(), vec!["one twoone two"]);
    assert_eq!(h.message().as_deref(), Some("Pasted from clipboard"));
}

#[test]
fn cut_removes_and_paste_restores() {
    let mut h = Harness::with_text("keep\ndrop");
    h.ctrl('a');
    h.ctrl('x');
    assert_eq!(h.lines(), vec![""]);
    assert_eq!(h.session.state().clipboard.internal(), "keep\ndrop");
    h.ctrl('v');
    assert_eq!(h.lines(), vec!["keep", "drop"]);
    assert_eq!(h.cursor(), Position::new(1, 4));
}

#[test]
fn copy_without_selection_reports() {
    let mut h = Harness::with_text("abc");
    h.ctrl('c');
    assert_eq!(h.message().as_deref(), Some("Nothing selected"));
    h.ctrl('v');
    assert_eq!(h.message().as_deref(), Some("Clipboard is empty"));
    assert_eq!(h.lines(), vec!["abc"]);
}

#[test]
fn bracketed_paste_is_one_undo_step() {
    let mut h = Harness::with_text("");
    h.session
        .handle_event(core_events::Event::Paste("a\r\nb".to_string()));
    assert_eq!(h.lines(), vec!["a", "b"]);
    h.ctrl('z');
    assert_eq!(h.lines(), vec![""]);
}

#[test]
fn apply_accepts_actions_directly() {
    let mut h = Harness::with_text("");
    let r = h.session.apply(Action::Edit(EditKind::InsertChar('q')));
    assert!(r.dirty);
    assert_eq!(h.lines(), vec!["q"]);
    let r = h.session.apply(Action::Undo);
    assert!(r.dirty);
    let r = h.session.apply(Action::Undo);
    assert!(!r.dirty);
}

#[test]
fn word_count_message() {
    let mut h = Harness::with_text("two words\nand three more");
    h.ctrl('w');
    assert_eq!(
        h.message().as_deref(),
        Some("Words: 5, Characters: 23, Lines: 2")
    );
}

#[test]
fn ctrl_shortcuts_ignore_case() {
    let mut h = Harness::with_text("a");
    h.key(KeyEvent::ctrl('A'));
    assert!(h.session.state().selection.get().is_some());
}
