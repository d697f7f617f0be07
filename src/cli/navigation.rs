use crossterm::event::{self, Event, KeyCode, KeyEventKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Home,
    End,
    Char(char),
    Unknown,
}

pub fn map_key_code(code: KeyCode) -> NavKey {
    match code {
        KeyCode::Up => NavKey::Up,
        KeyCode::Down => NavKey::Down,
        KeyCode::Left => NavKey::Left,
        KeyCode::Right => NavKey::Right,
        KeyCode::Enter => NavKey::Enter,
        KeyCode::Esc => NavKey::Esc,
        KeyCode::Home => NavKey::Home,
        KeyCode::End => NavKey::End,
        KeyCode::Char(c) => NavKey::Char(c),
        _ => NavKey::Unknown,
    }
}

pub fn read_nav_key() -> NavKey {
    match event::read() {
        Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => map_key_code(key.code),
        _ => NavKey::Unknown,
    }
}

/// Renders, then blocks until a recognised key arrives.
pub fn navigation_loop<F>(mut render: F) -> NavKey
where
    F: FnMut(),
{
    loop {
        render();
        match read_nav_key() {
            NavKey::Unknown => continue,
            key => return key,
        }
    }
}
