//! Keyboard-driven amount entry.

pub mod field;
pub mod keys;
pub mod numeric;

pub use field::AmountField;
pub use keys::{map_key_code, map_key_event, EditKey};
pub use numeric::{
    display_amount, display_value, on_blur, on_change, on_key_down, parse_amount, AmountState,
    KeyAction, DEFAULT_FALLBACK,
};
