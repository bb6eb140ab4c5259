//! Key bindings: arrows move and drop, q/w rotate.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Action from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Drop,
    RotateCcw,
    RotateCw,
    Quit,
    None,
}

/// Map key event to game action. Esc and Ctrl-C leave the program.
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent { code, modifiers, .. } = key;
    if modifiers == KeyModifiers::CONTROL {
        return match code {
            KeyCode::Char('c') => Action::Quit,
            _ => Action::None,
        };
    }
    let no_mod = modifiers.is_empty() || modifiers == KeyModifiers::SHIFT;
    if !no_mod {
        return Action::None;
    }
    match code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Left => Action::MoveLeft,
        KeyCode::Right => Action::MoveRight,
        KeyCode::Down => Action::Drop,
        KeyCode::Char('q' | 'Q') => Action::RotateCcw,
        KeyCode::Char('w' | 'W') | KeyCode::Up => Action::RotateCw,
        _ => Action::None,
    }
}
