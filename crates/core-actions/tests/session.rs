//! Session-level behavior: prompts, files, timers and rendering.

mod common;

use std::path::PathBuf;
use std::time::Duration;

use common::Harness;
use core_actions::ConfirmChoice;
use core_config::ConfigFile;
use core_events::{Event, KeyCode};
use core_render::{CellFlags, PlainTheme};
use core_text::Position;
use pretty_assertions::assert_eq;

#[test]
fn replace_all_is_one_undo_step() {
    let mut h = Harness::with_text("foo bar foo");
    h.ctrl('r');
    assert_eq!(h.session.state().prompt.display().as_deref(), Some("Replace: "));
    h.type_str("foo\n");
    h.type_str("baz\n");
    assert_eq!(h.lines(), vec!["baz bar baz"]);
    assert_eq!(h.message().as_deref(), Some("Replaced 2 occurrences"));
    assert!(!h.session.state().prompt.is_active());
    h.ctrl('z');
    assert_eq!(h.lines(), vec!["foo bar foo"]);
}

#[test]
fn replace_without_matches_leaves_history_alone() {
    let mut h = Harness::with_text("abc");
    h.ctrl('r');
    h.type_str("zzz\nyyy\n");
    assert_eq!(h.message().as_deref(), Some("Not found: zzz"));
    assert_eq!(h.session.state().undo_depth(), 0);
}

#[test]
fn find_cycles_through_matches() {
    let mut h = Harness::with_text("alpha beta alpha");
    h.ctrl('f');
    h.type_str("alpha\n");
    assert_eq!(h.cursor(), Position::new(0, 0));
    assert_eq!(h.message().as_deref(), Some("Match 1 of 2: alpha"));
    let sel = h.session.state().selection.get().expect("match selected");
    assert_eq!(sel.anchor, Position::new(0, 5));

    h.press(KeyCode::F(3));
    assert_eq!(h.cursor(), Position::new(0, 11));
    assert_eq!(h.message().as_deref(), Some("Match 2 of 2: alpha"));

    h.type_str("n");
    assert_eq!(h.cursor(), Position::new(0, 0));
    assert_eq!(h.message().as_deref(), Some("Match 1 of 2: alpha"));
}

#[test]
fn find_next_includes_match_under_moved_cursor() {
    let mut h = Harness::with_text("alpha beta alpha");
    h.ctrl('f');
    h.type_str("alpha\n");
    h.type_str("ee");
    assert_eq!(h.cursor(), Position::new(0, 11));
    assert!(h.session.state().selection.get().is_none());

    h.press(KeyCode::F(3));
    assert_eq!(h.cursor(), Position::new(0, 11));
    assert_eq!(h.message().as_deref(), Some("Match 2 of 2: alpha"));

    h.press(KeyCode::F(3));
    assert_eq!(h.cursor(), Position::new(0, 0));
}

#[test]
fn find_reports_missing_term() {
    let mut h = Harness::with_text("text");
    h.ctrl('f');
    h.type_str("nope\n");
    assert_eq!(h.message().as_deref(), Some("Not found: nope"));
    assert_eq!(h.cursor(), Position::new(0, 0));
}

#[test]
fn find_next_without_history_opens_prompt() {
    let mut h = Harness::with_text("text");
    h.press(KeyCode::F(3));
    assert_eq!(h.session.state().prompt.display().as_deref(), Some("Find: "));
}

#[test]
fn prompt_keys_edit_input_and_escape_cancels() {
    let mut h = Harness::with_text("keep");
    h.ctrl('f');
    h.type_str("kex");
    h.press(KeyCode::Backspace);
    assert_eq!(h.session.state().prompt.display().as_deref(), Some("Find: ke"));
    // navigation letters go to the prompt, not the cursor
    assert_eq!(h.cursor(), Position::new(0, 0));
    h.press(KeyCode::Esc);
    assert!(!h.session.state().prompt.is_active());
    assert_eq!(h.lines(), vec!["keep"]);
}

#[test]
fn paste_event_goes_to_open_prompt() {
    let mut h = Harness::with_text("abc");
    h.ctrl('f');
    h.session.handle_event(Event::Paste("bc".to_string()));
    assert_eq!(h.session.state().prompt.display().as_deref(), Some("Find: bc"));
    assert_eq!(h.lines(), vec!["abc"]);
}

#[test]
fn go_to_line_variants() {
    let mut h = Harness::with_text("1\n2\n3\n4");
    h.ctrl('g');
    h.type_str("3\n");
    assert_eq!(h.cursor(), Position::new(2, 0));

    h.ctrl('g');
    h.type_str("99\n");
    assert_eq!(h.cursor(), Position::new(3, 0));
    assert_eq!(h.message().as_deref(), Some("Line clamped to 4"));

    h.ctrl('g');
    h.type_str("abc\n");
    assert_eq!(h.cursor(), Position::new(3, 0));
    assert_eq!(h.last_error().as_deref(), Some("Invalid line number: abc"));
}

#[test]
fn save_without_name_prompts_then_binds() {
    let mut h = Harness::new();
    h.type_str("idraft");
    h.ctrl('s');
    assert_eq!(h.session.state().prompt.display().as_deref(), Some("Save as: "));
    h.type_str("/mem/draft.md\n");
    assert_eq!(h.files.get("/mem/draft.md").as_deref(), Some("draft"));
    assert_eq!(h.session.state().file_name, Some(PathBuf::from("/mem/draft.md")));
    assert!(!h.session.state().is_dirty());
    assert_eq!(h.message().as_deref(), Some("Saved: draft.md"));
}

#[test]
fn save_keeps_original_line_endings() {
    let mut h = Harness::new();
    h.open("one\r\ntwo\r\n");
    h.press(KeyCode::End);
    h.type_str("i!");
    h.ctrl('s');
    assert_eq!(h.files.get("/mem/doc.txt").as_deref(), Some("one!\r\ntwo\r\n"));
}

#[test]
fn save_failure_is_reported_and_stays_dirty() {
    let mut h = Harness::with_text("x");
    h.type_str("iy");
    h.files.fail_writes.set(true);
    h.ctrl('s');
    let err = h.last_error().expect("error shown");
    assert!(err.starts_with("Save failed:"), "{err}");
    assert!(err.contains("disk full"), "{err}");
    assert!(h.session.state().is_dirty());
    assert_eq!(
        h.session.state().ephemeral_status.as_ref().map(|m| m.level),
        Some(core_state::MessageLevel::Error)
    );
}

#[test]
fn missing_startup_file_becomes_new_document() {
    let mut h = Harness::new();
    h.session.open_initial(std::path::Path::new("/mem/fresh.md"));
    assert_eq!(h.lines(), vec![""]);
    assert_eq!(h.message().as_deref(), Some("New file: fresh.md"));
    h.type_str("ihi");
    h.ctrl('s');
    assert_eq!(h.files.get("/mem/fresh.md").as_deref(), Some("hi"));
}

#[test]
fn open_asks_before_discarding_changes() {
    let mut h = Harness::with_text("old");
    h.files.put("/mem/other.txt", "other");
    h.type_str("ix");

    // cancel keeps everything
    h.ctrl('o');
    assert_eq!(*h.confirm.asked.borrow(), vec!["Save changes to doc.txt?".to_string()]);
    assert!(!h.session.state().prompt.is_active());

    h.answer(ConfirmChoice::Discard);
    h.ctrl('o');
    assert_eq!(h.session.state().prompt.display().as_deref(), Some("Open: "));
    h.type_str("/mem/other.txt\n");
    assert_eq!(h.lines(), vec!["other"]);
    assert_eq!(h.session.state().undo_depth(), 0);
    assert_eq!(h.message().as_deref(), Some("Opened: other.txt"));
    // discarded, never written
    assert_eq!(h.files.get("/mem/doc.txt").as_deref(), Some("old"));
}

#[test]
fn open_missing_file_keeps_document() {
    let mut h = Harness::with_text("stay");
    h.ctrl('o');
    h.type_str("/mem/none.txt\n");
    assert_eq!(h.lines(), vec!["stay"]);
    let err = h.last_error().expect("error");
    assert!(err.starts_with("Open failed:"), "{err}");
}

#[test]
fn confirm_save_writes_before_new() {
    let mut h = Harness::with_text("a");
    h.type_str("ib");
    h.answer(ConfirmChoice::Save);
    h.ctrl('n');
    assert_eq!(h.files.get("/mem/doc.txt").as_deref(), Some("ba"));
    assert_eq!(h.lines(), vec![""]);
    assert_eq!(h.session.state().file_name, None);
    assert_eq!(h.message().as_deref(), Some("New file"));
}

#[test]
fn quit_respects_confirmation() {
    let mut h = Harness::with_text("a");
    h.type_str("ib");
    h.ctrl('q');
    assert!(!h.session.should_quit());
    h.answer(ConfirmChoice::Discard);
    h.ctrl('q');
    assert!(h.session.should_quit());
}

#[test]
fn clean_quit_does_not_ask() {
    let mut h = Harness::with_text("a");
    h.ctrl('q');
    assert!(h.session.should_quit());
    assert!(h.confirm.asked.borrow().is_empty());
}

#[test]
fn autosave_on_tick() {
    let mut h = Harness::with_text("hello");
    h.type_str("ix");
    h.session.handle_event(Event::Tick(h.t0 + Duration::from_secs(10)));
    assert_eq!(h.files.get("/mem/doc.txt").as_deref(), Some("hello"));
    h.session.handle_event(Event::Tick(h.t0 + Duration::from_secs(31)));
    assert_eq!(h.files.get("/mem/doc.txt").as_deref(), Some("xhello"));
    assert!(!h.session.state().is_dirty());
}

#[test]
fn autosave_failure_shows_error() {
    let mut h = Harness::with_text("hello");
    h.type_str("ix");
    h.files.fail_writes.set(true);
    h.session.tick(h.t0 + Duration::from_secs(30));
    let err = h.last_error().expect("error");
    assert!(err.starts_with("Auto-save failed:"), "{err}");
    assert!(h.session.state().is_dirty());
}

#[test]
fn autosave_skips_unnamed_documents() {
    let mut h = Harness::new();
    h.type_str("itext");
    h.session.tick(h.t0 + Duration::from_secs(60));
    assert!(h.files.files.borrow().is_empty());
    assert!(h.last_error().is_none());
}

#[test]
fn ephemeral_message_expires() {
    let mut h = Harness::with_text("a b");
    h.ctrl('w');
    assert!(h.message().is_some());
    h.session.tick(h.t0 + Duration::from_secs(2));
    assert!(h.message().is_some());
    h.session.tick(h.t0 + Duration::from_secs(3));
    assert!(h.message().is_none());
}

#[test]
fn cursor_blinks_and_wakes_on_key() {
    let mut h = Harness::with_text("abc");
    assert!(h.session.state().cursor_visible);
    let r = h.session.tick(h.t0 + Duration::from_millis(600));
    assert!(r.dirty);
    assert!(!h.session.state().cursor_visible);
    h.type_str("d");
    assert!(h.session.state().cursor_visible);
    // the phase restarted at the key press
    h.session.tick(h.t0 + Duration::from_millis(900));
    assert!(h.session.state().cursor_visible);
}

#[test]
fn render_status_and_message_lines() {
    let mut h = Harness::with_text("one two");
    h.ctrl('w');
    let screen = h.session.render(&PlainTheme);
    assert_eq!(screen.status_row, Some(22));
    assert_eq!(screen.message_row, Some(23));
    let status = screen.status.expect("status line");
    assert_eq!(status.chars().count(), 80);
    assert!(status.starts_with(" NAV | doc.txt | 1:1"), "{status}");
    assert!(status.ends_with("2 words "), "{status}");
    let message = screen.message.expect("message line");
    assert!(message.starts_with("Words: 2"), "{message}");
    assert!(!screen.message_is_error);
    assert_eq!(screen.text.height, 22);
    assert_eq!(screen.text.row_text(0).trim_end(), "   1 one two");
}

#[test]
fn prompt_moves_cursor_to_message_line() {
    let mut h = Harness::with_text("x");
    h.ctrl('g');
    h.type_str("12");
    let screen = h.session.render(&PlainTheme);
    assert_eq!(screen.text.cursor, None);
    assert_eq!(screen.message_cursor, Some("Go to line: 12".len() as u16));
    assert!(screen.message.expect("message").starts_with("Go to line: 12"));
}

#[test]
fn distraction_free_hides_status_line() {
    let mut h = Harness::with_text("x");
    h.press(KeyCode::F(11));
    assert_eq!(h.message().as_deref(), Some("Distraction-free mode: ON"));
    let screen = h.session.render(&PlainTheme);
    assert!(screen.status.is_none());
    assert_eq!(screen.text.height, 23);
    assert_eq!(screen.message_row, Some(23));
}

#[test]
fn toggling_line_numbers_drops_gutter() {
    let mut h = Harness::with_text("body");
    h.ctrl('l');
    assert_eq!(h.message().as_deref(), Some("Line numbers: OFF"));
    let screen = h.session.render(&PlainTheme);
    assert_eq!(screen.text.row_text(0).trim_end(), "body");
}

#[test]
fn typewriter_keeps_cursor_row_fixed() {
    let mut file = ConfigFile::default();
    file.typewriter.enabled = true;
    file.typewriter.position = 0.5;
    file.typewriter.focus_lines = 1;
    let mut h = Harness::with_config(file);
    let text: Vec<String> = (0..40).map(|i| format!("line {i}")).collect();
    h.open(&text.join("\n"));
    h.session.handle_event(Event::Resize { cols: 60, rows: 12 });
    for _ in 0..20 {
        h.type_str("s");
    }
    assert_eq!(h.cursor(), Position::new(20, 0));
    assert_eq!(h.session.model().view().viewport.scroll_row, 15);
    let screen = h.session.render(&PlainTheme);
    let cursor = screen.text.cursor.expect("cursor");
    assert_eq!(cursor.y, 5);
    assert!(screen.status.expect("status").ends_with("TYPEWRITER "));
    let dimmed = |y: u16| {
        screen
            .text
            .cell(6, y)
            .is_some_and(|c| c.flags.contains(CellFlags::DIM))
    };
    assert!(dimmed(3));
    assert!(!dimmed(4));
    assert!(!dimmed(6));
    assert!(dimmed(7));
}

#[test]
fn resize_rescrolls_to_cursor() {
    let mut h = Harness::new();
    let text: Vec<String> = (0..30).map(|i| i.to_string()).collect();
    h.open(&text.join("\n"));
    h.key(core_events::KeyEvent::new(KeyCode::End, core_events::KeyModifiers::CTRL));
    assert_eq!(h.cursor(), Position::new(29, 2));
    h.session.handle_event(Event::Resize { cols: 20, rows: 7 });
    let view = h.session.model().view();
    assert_eq!(view.viewport.rows, 5);
    assert!(view.viewport.contains_line(29));
    assert_eq!(h.session.screen_size(), (20, 7));
}

#[test]
fn shutdown_event_quits() {
    let mut h = Harness::new();
    let r = h.session.handle_event(Event::Shutdown);
    assert!(r.quit);
    assert!(h.session.should_quit());
}
