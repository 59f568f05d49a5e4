use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    CancelAnimations,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    // Complete or abandon a pending 'gg' sequence
    if app.pending_key == Some('g') {
        return match key.code {
            KeyCode::Char('g') => Action::JumpToTop,
            _ => Action::None,
        };
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('d') if ctrl => Action::ScrollHalfPageDown,
        KeyCode::Char('u') if ctrl => Action::ScrollHalfPageUp,
        KeyCode::Char('f') if ctrl => Action::ScrollPageDown,
        KeyCode::Char('b') if ctrl => Action::ScrollPageUp,
        KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
        KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
        KeyCode::Char(' ') | KeyCode::PageDown => Action::ScrollPageDown,
        KeyCode::PageUp => Action::ScrollPageUp,
        KeyCode::Char('g') => Action::PendingG,
        KeyCode::Char('G') | KeyCode::End => Action::JumpToBottom,
        KeyCode::Home => Action::JumpToTop,
        KeyCode::Char('c') => Action::CancelAnimations,
        _ => Action::None,
    }
}
