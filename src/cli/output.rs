use colored::{Color, Colorize};
use std::fmt;
use std::sync::{OnceLock, RwLock};

use crate::domain::account::AccountType;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warning,
    Error,
    Section,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutputPreferences {
    /// ASCII-only output without colour.
    pub plain_mode: bool,
    pub color_enabled: bool,
}

impl OutputPreferences {
    pub fn use_color(&self) -> bool {
        self.color_enabled && !self.plain_mode
    }
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
}

pub fn current_preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn apply_style(kind: MessageKind, message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    let text = message.to_string();
    let formatted = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        MessageKind::Info => text,
        MessageKind::Warning => format!("Warning: {}", text),
        MessageKind::Error => format!("Error: {}", text),
    };

    if !prefs.use_color() {
        return formatted;
    }

    match kind {
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
        MessageKind::Info => formatted,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let prefs = current_preferences();
    let formatted = apply_style(kind, message, &prefs);
    match kind {
        MessageKind::Error | MessageKind::Warning => eprintln!("{}", formatted),
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

fn type_color(kind: AccountType) -> Color {
    match kind {
        AccountType::Asset => Color::Blue,
        AccountType::Liability => Color::Red,
        AccountType::Equity => Color::Green,
        AccountType::Revenue => Color::Magenta,
        AccountType::Expense => Color::Yellow,
    }
}

/// Account type label, coloured per type when colour is enabled.
pub fn type_badge(kind: AccountType, prefs: &OutputPreferences) -> String {
    if prefs.use_color() {
        kind.label().color(type_color(kind)).to_string()
    } else {
        kind.label().to_string()
    }
}
