use serde::{Deserialize, Serialize};

/// Currency and number formatting preferences for displayed amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrencySettings {
    pub code: String,
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub max_fraction_digits: u8,
}

impl Default for CurrencySettings {
    fn default() -> Self {
        Self {
            code: "IDR".into(),
            language_tag: "id-ID".into(),
            decimal_separator: ',',
            grouping_separator: '.',
            max_fraction_digits: 2,
        }
    }
}

impl CurrencySettings {
    /// US-style settings, mostly useful for tests and English locales.
    pub fn usd() -> Self {
        Self {
            code: "USD".into(),
            language_tag: "en-US".into(),
            decimal_separator: '.',
            grouping_separator: ',',
            max_fraction_digits: 2,
        }
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "IDR" => "Rp".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "SGD" => "S$".into(),
        _ => code.into(),
    }
}

/// Formats `amount` with grouping and up to `max_fraction_digits` decimals,
/// dropping trailing zeros.
pub fn format_number(settings: &CurrencySettings, amount: f64) -> String {
    let rendered = format!("{:.*}", settings.max_fraction_digits as usize, amount.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part.trim_end_matches('0')),
        None => (rendered.as_str(), ""),
    };

    let mut body = group_digits(int_part, settings.grouping_separator);
    if !frac_part.is_empty() {
        body.push(settings.decimal_separator);
        body.push_str(frac_part);
    }
    if amount < 0.0 && body.chars().any(|ch| ch.is_ascii_digit() && ch != '0') {
        body.insert(0, '-');
    }
    body
}

/// Formats `amount` as a currency value, e.g. `Rp 1.234.567` or `-Rp 12,5`.
pub fn format_currency(amount: f64, settings: &CurrencySettings) -> String {
    let body = format_number(settings, amount);
    let symbol = symbol_for(&settings.code);
    match body.strip_prefix('-') {
        Some(unsigned) => format!("-{} {}", symbol, unsigned),
        None => format!("{} {}", symbol, body),
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}
