use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keystroke as seen by an editable text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Char(char),
    Backspace,
    Delete,
    Tab,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Esc,
    Other,
}

impl EditKey {
    /// Keys that move the cursor or leave the field rather than change text.
    pub fn is_navigation(self) -> bool {
        matches!(
            self,
            EditKey::Tab
                | EditKey::Enter
                | EditKey::Left
                | EditKey::Right
                | EditKey::Up
                | EditKey::Down
                | EditKey::Home
                | EditKey::End
                | EditKey::Esc
        )
    }
}

pub fn map_key_code(code: KeyCode) -> EditKey {
    match code {
        KeyCode::Char(c) => EditKey::Char(c),
        KeyCode::Backspace => EditKey::Backspace,
        KeyCode::Delete => EditKey::Delete,
        KeyCode::Tab | KeyCode::BackTab => EditKey::Tab,
        KeyCode::Enter => EditKey::Enter,
        KeyCode::Left => EditKey::Left,
        KeyCode::Right => EditKey::Right,
        KeyCode::Up => EditKey::Up,
        KeyCode::Down => EditKey::Down,
        KeyCode::Home => EditKey::Home,
        KeyCode::End => EditKey::End,
        KeyCode::Esc => EditKey::Esc,
        _ => EditKey::Other,
    }
}

/// Maps a full key event; chords with Ctrl or Alt never count as typed text.
pub fn map_key_event(event: &KeyEvent) -> EditKey {
    let chord = event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    match map_key_code(event.code) {
        EditKey::Char(_) if chord => EditKey::Other,
        key => key,
    }
}
