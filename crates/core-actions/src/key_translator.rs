//! Key to `Action` translation.
//!
//! Stateless: the mode and whether a prompt is open are passed in, so the
//! same key always maps the same way for the same inputs. Lookup order:
//! 1. An open prompt captures every key it understands.
//! 2. Mode-independent shortcuts (Ctrl chords, function keys, arrows).
//! 3. The per-mode table.

use crate::{Action, EditKind, FileCommand, ModeChange, MotionKind, PromptInput, Toggle};
use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_state::{Mode, PromptKind};

pub fn translate_key(mode: Mode, prompt_active: bool, key: &KeyEvent) -> Option<Action> {
    let action = if prompt_active {
        prompt_map(key)
    } else {
        global_map(key).or_else(|| match mode {
            Mode::Navigation => navigation_map(key),
            Mode::Insert => insert_map(key),
        })
    };
    tracing::trace!(target: "actions.dispatch", key = %key, ?mode, prompt_active, ?action, "translate_key");
    action
}

fn prompt_map(key: &KeyEvent) -> Option<Action> {
    let input = match key.code {
        KeyCode::Esc => PromptInput::Cancel,
        KeyCode::Enter => PromptInput::Submit,
        KeyCode::Backspace => PromptInput::Backspace,
        KeyCode::Char(c) if !key.mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT) => {
            PromptInput::Char(c)
        }
        _ => return None,
    };
    Some(Action::Prompt(input))
}

fn global_map(key: &KeyEvent) -> Option<Action> {
    let shift = key.is_shift();
    if key.is_ctrl() {
        if let KeyCode::Char(c) = key.code {
            // some terminals report Ctrl+Shift+S as an upper-case char
            let shifted = shift || c.is_uppercase();
            return ctrl_map(c.to_ascii_lowercase(), shifted);
        }
        return match key.code {
            KeyCode::Left => motion(MotionKind::WordLeft, shift),
            KeyCode::Right => motion(MotionKind::WordRight, shift),
            KeyCode::Home => motion(MotionKind::DocStart, shift),
            KeyCode::End => motion(MotionKind::DocEnd, shift),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Esc => Some(Action::ModeChange(ModeChange::LeaveInsert)),
        KeyCode::F(3) => Some(Action::FindNext),
        KeyCode::F(11) => Some(Action::Toggle(Toggle::DistractionFree)),
        KeyCode::F(12) => Some(Action::File(FileCommand::SaveAs)),
        KeyCode::Up => motion(MotionKind::Up, shift),
        KeyCode::Down => motion(MotionKind::Down, shift),
        KeyCode::Left => motion(MotionKind::Left, shift),
        KeyCode::Right => motion(MotionKind::Right, shift),
        KeyCode::Home => motion(MotionKind::LineStart, shift),
        KeyCode::End => motion(MotionKind::LineEnd, shift),
        KeyCode::PageUp => motion(MotionKind::PageUp, shift),
        KeyCode::PageDown => motion(MotionKind::PageDown, shift),
        KeyCode::Delete => Some(Action::Edit(EditKind::DeleteForward)),
        _ => None,
    }
}

fn ctrl_map(c: char, shift: bool) -> Option<Action> {
    Some(match c {
        'z' => Action::Undo,
        'y' => Action::Redo,
        'a' => Action::SelectAll,
        'c' => Action::Copy,
        'x' => Action::Cut,
        'v' => Action::Paste,
        's' if shift => Action::File(FileCommand::SaveAs),
        's' => Action::File(FileCommand::Save),
        'n' => Action::File(FileCommand::New),
        'o' => Action::File(FileCommand::Open),
        'f' => Action::StartPrompt(PromptKind::Find),
        'r' => Action::StartPrompt(PromptKind::ReplaceTerm),
        'g' => Action::StartPrompt(PromptKind::GoToLine),
        't' => Action::Toggle(Toggle::Typewriter),
        'l' => Action::Toggle(Toggle::LineNumbers),
        'w' => Action::WordCount,
        'q' => Action::Quit,
        _ => return None,
    })
}

fn navigation_map(key: &KeyEvent) -> Option<Action> {
    if key.mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT) {
        return None;
    }
    let KeyCode::Char(c) = key.code else {
        return None;
    };
    let action = match c {
        'i' => Action::ModeChange(ModeChange::EnterInsert),
        'w' | 'W' | 'k' => Action::Motion { kind: MotionKind::Up, extend: false },
        'a' | 'A' | 'h' => Action::Motion { kind: MotionKind::Left, extend: false },
        's' | 'S' | 'j' => Action::Motion { kind: MotionKind::Down, extend: false },
        'd' | 'D' | 'l' => Action::Motion { kind: MotionKind::Right, extend: false },
        '0' => Action::Motion { kind: MotionKind::LineStart, extend: false },
        '$' => Action::Motion { kind: MotionKind::LineEnd, extend: false },
        'g' => Action::Motion { kind: MotionKind::DocStart, extend: false },
        'G' => Action::Motion { kind: MotionKind::DocEnd, extend: false },
        'b' => Action::Motion { kind: MotionKind::WordLeft, extend: false },
        'e' => Action::Motion { kind: MotionKind::WordRight, extend: false },
        'o' => Action::Edit(EditKind::OpenLineBelow),
        'x' => Action::Edit(EditKind::DeleteForward),
        'X' => Action::Edit(EditKind::DeleteLine),
        '/' => Action::StartPrompt(PromptKind::Find),
        'n' => Action::FindNext,
        _ => return None,
    };
    Some(action)
}

fn insert_map(key: &KeyEvent) -> Option<Action> {
    let edit = match key.code {
        KeyCode::Char(c) if !key.mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT) => {
            EditKind::InsertChar(c)
        }
        KeyCode::Enter => EditKind::InsertNewline,
        KeyCode::Tab => EditKind::InsertTab,
        KeyCode::Backspace => EditKind::Backspace,
        _ => return None,
    };
    Some(Action::Edit(edit))
}

fn motion(kind: MotionKind, extend: bool) -> Option<Action> {
    Some(Action::Motion { kind, extend })
}
