//! End-to-end compositor scenarios driven through `EditorModel`.

use core_model::{EditorModel, Typewriter, Viewport};
use core_render::{CellFlags, ComposeInput, PlainTheme, compose_frame};
use core_state::{EditorState, Selection};
use core_text::{Buffer, Position};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn model(lines: &[&str], rows: usize, cols: usize) -> EditorModel {
    let mut m = EditorModel::new(EditorState::new(Buffer::from_lines("t", lines)));
    m.view_mut().viewport = Viewport::new(rows, cols);
    m
}

fn input(m: &EditorModel) -> ComposeInput<'_> {
    let st = m.state();
    ComposeInput {
        buffer: &st.buffer,
        viewport: m.view().viewport,
        cursor: m.view().cursor,
        cursor_visible: st.cursor_visible,
        mode: st.mode,
        selection: st.selection.get(),
        gutter_width: m.gutter_width(),
        focus_lines: st.typewriter.then_some(1),
    }
}

#[test]
fn scrolled_document_with_gutter() {
    let lines: Vec<String> = (1..=10).map(|i| format!("line {i}")).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let mut m = model(&refs, 3, 12);
    m.view_mut().cursor = Position::new(7, 0);
    m.scroll(&Typewriter::default());
    let f = compose_frame(&input(&m), &PlainTheme);
    let rows: Vec<String> = (0..3).map(|y| f.row_text(y)).collect();
    assert_eq!(rows, vec!["   6 line 6 ", "   7 line 7 ", "   8 line 8 "]);
    assert_eq!(f.cursor.map(|c| (c.x, c.y)), Some((5, 2)));
}

#[test]
fn typewriter_keeps_cursor_on_target_row_and_dims() {
    let lines: Vec<String> = (0..40).map(|i| format!("{i}")).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let mut m = model(&refs, 10, 8);
    m.state_mut().typewriter = true;
    m.state_mut().line_numbers = false;
    let tw = Typewriter { position: 0.5, focus_lines: 1 };
    for line in 0..30 {
        m.view_mut().cursor = Position::new(line, 0);
        m.scroll(&tw);
    }
    let f = compose_frame(&input(&m), &PlainTheme);
    assert_eq!(f.cursor.map(|c| c.y), Some(5));
    assert_eq!(f.row_text(5).trim_end(), "29");
    assert!(f.cell(0, 3).unwrap().flags.contains(CellFlags::DIM));
    assert!(!f.cell(0, 4).unwrap().flags.contains(CellFlags::DIM));
    assert!(!f.cell(0, 6).unwrap().flags.contains(CellFlags::DIM));
    assert!(f.cell(0, 7).unwrap().flags.contains(CellFlags::DIM));
}

#[test]
fn multi_row_selection_overlay() {
    let mut m = model(&["hello", "big", "world"], 3, 8);
    m.state_mut().line_numbers = false;
    m.state_mut()
        .selection
        .set(Selection::new(Position::new(2, 2), Position::new(0, 3)));
    m.view_mut().cursor = Position::new(2, 2);
    let f = compose_frame(&input(&m), &PlainTheme);
    let marks = |y: u16| -> String {
        (0..8)
            .map(|x| {
                if f.cell(x, y).unwrap().flags.contains(CellFlags::SELECTED) { '#' } else { '.' }
            })
            .collect()
    };
    assert_eq!(marks(0), "...###..");
    assert_eq!(marks(1), "####....");
    assert_eq!(marks(2), "##......");
}

proptest! {
    // Every composed row is exactly `cols` cells wide whatever the content.
    #[test]
    fn rows_always_full_width(
        lines in proptest::collection::vec("[a-z漢 e\u{0301}\t]{0,30}", 1..8),
        rows in 1usize..8,
        cols in 1usize..30,
        scroll_col in 0usize..10,
    ) {
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut m = model(&refs, rows, cols);
        m.view_mut().viewport.scroll_col = scroll_col;
        let f = compose_frame(&input(&m), &PlainTheme);
        prop_assert_eq!(f.cells.len(), rows * cols);
        for y in 0..f.height {
            let w: u16 = f.row_leaders(y).map(|(c, _)| c.visual_width()).sum();
            prop_assert_eq!(w as usize, cols);
        }
    }
}
