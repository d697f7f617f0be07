use crate::input::keys::EditKey;
use crate::input::numeric::{
    display_amount, on_blur, on_change, on_key_down, AmountState, KeyAction, DEFAULT_FALLBACK,
};

/// Editable amount input.
///
/// Keeps the raw text the user sees next to the sanitized state. Every
/// keystroke goes through [`on_key_down`] before the default edit is
/// applied; [`AmountField::blur`] settles the text on a finite number.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountField {
    text: String,
    cursor: usize,
    state: AmountState,
    fallback: f64,
}

impl Default for AmountField {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK)
    }
}

impl AmountField {
    /// Field starting out at `fallback`.
    pub fn new(fallback: f64) -> Self {
        Self::with_value(fallback, fallback)
    }

    /// Field pre-filled with `value`; zero shows as an empty field.
    pub fn with_value(value: f64, fallback: f64) -> Self {
        let text = display_amount(value);
        Self {
            cursor: text.chars().count(),
            text,
            state: AmountState::Value(value),
            fallback,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position, in characters from the start of the text.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> AmountState {
        self.state
    }

    pub fn fallback(&self) -> f64 {
        self.fallback
    }

    /// The number this field would submit right now.
    pub fn value(&self) -> f64 {
        on_blur(&self.text, self.fallback)
    }

    /// Applies one keystroke. Returns `false` when it was rejected.
    pub fn handle_key(&mut self, key: EditKey) -> bool {
        match on_key_down(&key, &self.text) {
            KeyAction::Reject => false,
            KeyAction::Replace(text) => {
                self.set_text(text);
                true
            }
            KeyAction::Allow => {
                self.apply_default(key);
                true
            }
        }
    }

    /// Replaces the whole text, as a paste would.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.chars().count();
        self.state = on_change(&self.text, self.fallback);
    }

    /// Resolves the field and re-renders its text from the resolved number.
    pub fn blur(&mut self) -> f64 {
        let value = on_blur(&self.text, self.fallback);
        *self = Self::with_value(value, self.fallback);
        value
    }

    fn apply_default(&mut self, key: EditKey) {
        let len = self.text.chars().count();
        match key {
            EditKey::Char(ch) => {
                let at = self.byte_offset(self.cursor);
                self.text.insert(at, ch);
                self.cursor += 1;
            }
            EditKey::Backspace if self.cursor > 0 => {
                let at = self.byte_offset(self.cursor - 1);
                self.text.remove(at);
                self.cursor -= 1;
            }
            EditKey::Delete if self.cursor < len => {
                let at = self.byte_offset(self.cursor);
                self.text.remove(at);
            }
            EditKey::Left => self.cursor = self.cursor.saturating_sub(1),
            EditKey::Right => self.cursor = (self.cursor + 1).min(len),
            EditKey::Home => self.cursor = 0,
            EditKey::End => self.cursor = len,
            _ => return,
        }
        if matches!(key, EditKey::Char(_) | EditKey::Backspace | EditKey::Delete) {
            self.state = on_change(&self.text, self.fallback);
        }
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }
}
