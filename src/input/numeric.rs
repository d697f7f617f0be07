//! Amount sanitizing for free-form numeric fields.
//!
//! A field goes through two kinds of values: what the user is in the middle
//! of typing, which may be empty or a lone minus sign, and the resolved
//! number used for submission, which is always finite.

use crate::input::keys::EditKey;

/// Fallback used when callers have no better default.
pub const DEFAULT_FALLBACK: f64 = 0.0;

/// Value held by an amount field while it is being edited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmountState {
    /// The field was cleared.
    Empty,
    /// Only a minus sign has been typed so far.
    Minus,
    Value(f64),
}

impl AmountState {
    /// Final number for this state; in-progress states resolve to `fallback`.
    pub fn resolve(self, fallback: f64) -> f64 {
        match self {
            AmountState::Value(value) => value,
            AmountState::Empty | AmountState::Minus => fallback,
        }
    }
}

/// What a field should do with a keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Let the default edit happen.
    Allow,
    /// Swallow the keystroke.
    Reject,
    /// Swallow the keystroke and set the field text instead.
    Replace(String),
}

/// Interprets the field text after an edit.
///
/// `""` and `"-"` are kept as in-progress states; anything else is parsed,
/// with unparseable text collapsing to `fallback`.
pub fn on_change(text: &str, fallback: f64) -> AmountState {
    match text {
        "" => AmountState::Empty,
        "-" => AmountState::Minus,
        _ => AmountState::Value(parse_amount(text).unwrap_or(fallback)),
    }
}

/// Decides how a keystroke applies to a field currently showing `current`.
///
/// Navigation keys always pass through untouched.
pub fn on_key_down(key: &EditKey, current: &str) -> KeyAction {
    match key {
        key if key.is_navigation() => KeyAction::Allow,
        EditKey::Backspace | EditKey::Delete if current == "0" => KeyAction::Replace(String::new()),
        EditKey::Char('-') if current.is_empty() || current == "0" => {
            KeyAction::Replace("-".to_string())
        }
        EditKey::Char(ch) if !is_amount_char(*ch) => KeyAction::Reject,
        _ => KeyAction::Allow,
    }
}

/// Resolves the field text to the number that gets submitted.
pub fn on_blur(text: &str, fallback: f64) -> f64 {
    on_change(text, fallback).resolve(fallback)
}

/// Text to show for `state`. Zero shows as an empty field.
pub fn display_value(state: &AmountState) -> String {
    match state {
        AmountState::Empty => String::new(),
        AmountState::Minus => "-".to_string(),
        AmountState::Value(value) => display_amount(*value),
    }
}

/// Text to show for a resolved amount. Zero shows as an empty field.
pub fn display_amount(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        value.to_string()
    }
}

fn is_amount_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.' || ch == '-'
}

/// Parses the longest numeric prefix of `text`, ignoring leading whitespace.
///
/// `"12abc"` yields 12 and `"1.2.3"` yields 1.2. Text without digits, or
/// that only produces an infinite value, yields `None`.
pub fn parse_amount(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let len = bytes.len();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let sign_len = end;

    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end - sign_len;
    let mut frac_digits = 0;

    if end < len && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < len && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        frac_digits = frac_end - end - 1;
        if frac_digits > 0 {
            end = frac_end;
        }
    }

    if int_digits + frac_digits == 0 {
        return None;
    }

    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < len && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < len && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    let literal = if int_digits == 0 {
        format!("{}0{}", &trimmed[..sign_len], &trimmed[sign_len..end])
    } else {
        trimmed[..end].to_string()
    };

    literal.parse::<f64>().ok().filter(|value| value.is_finite())
}
