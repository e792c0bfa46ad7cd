//! Key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CursorUp,
    CursorDown,
    /// Toggle the row under the cursor.
    ToggleRow,
    /// Check every row on the page, or uncheck them all if already checked.
    TogglePage,
    PrevPage,
    NextPage,
    FirstPage,
    LastPage,
    LargerPages,
    SmallerPages,
    Reload,
    Quit,
}

/// Maps a key event to an action. Releases and repeats of non-motion keys
/// are ignored.
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        };
    }

    let action = match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::CursorUp,
        KeyCode::Down | KeyCode::Char('j') => Action::CursorDown,
        KeyCode::Char(' ') | KeyCode::Enter => Action::ToggleRow,
        KeyCode::Char('a') => Action::TogglePage,
        KeyCode::Left | KeyCode::PageUp | KeyCode::Char('h') => Action::PrevPage,
        KeyCode::Right | KeyCode::PageDown | KeyCode::Char('l') => Action::NextPage,
        KeyCode::Home | KeyCode::Char('g') => Action::FirstPage,
        KeyCode::End | KeyCode::Char('G') => Action::LastPage,
        KeyCode::Char('+') | KeyCode::Char('=') => Action::LargerPages,
        KeyCode::Char('-') => Action::SmallerPages,
        KeyCode::Char('r') => Action::Reload,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };

    let motion = matches!(action, Action::CursorUp | Action::CursorDown);
    if key.kind == KeyEventKind::Repeat && !motion {
        return None;
    }
    Some(action)
}
