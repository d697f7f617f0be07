use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque account identifier as issued by the backend.
///
/// Backends disagree on whether identifiers are numbers or strings, so both
/// are accepted. A string holding a canonical integer (`"42"`) is read as a
/// number so that `"parent_id": "42"` still points at `"id": 42`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum AccountId {
    Number(i64),
    Text(String),
}

impl AccountId {
    fn from_text(text: String) -> Self {
        match text.parse::<i64>() {
            Ok(value) if value.to_string() == text => AccountId::Number(value),
            _ => AccountId::Text(text),
        }
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(value) => AccountId::Number(value),
            RawId::Text(text) => AccountId::from_text(text),
        })
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountId::Number(value) => write!(f, "{}", value),
            AccountId::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for AccountId {
    fn from(value: i64) -> Self {
        AccountId::Number(value)
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        AccountId::from_text(value.to_string())
    }
}

/// Enumerates the five account classes of the chart of accounts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

impl AccountType {
    pub const ALL: [AccountType; 5] = [
        AccountType::Asset,
        AccountType::Liability,
        AccountType::Equity,
        AccountType::Revenue,
        AccountType::Expense,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AccountType::Asset => "Asset",
            AccountType::Liability => "Liability",
            AccountType::Equity => "Equity",
            AccountType::Revenue => "Revenue",
            AccountType::Expense => "Expense",
        }
    }

    /// Leading digit of generated account codes.
    pub fn code_prefix(self) -> u32 {
        match self {
            AccountType::Asset => 1,
            AccountType::Liability => 2,
            AccountType::Equity => 3,
            AccountType::Revenue => 4,
            AccountType::Expense => 5,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(&needle))
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Account as received from the bookkeeping API.
///
/// Aggregates are optional: the plain account listing only carries the
/// opening balance, while the summary endpoint precomputes totals and nests
/// children directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountRecord {
    pub id: AccountId,
    #[serde(default)]
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<AccountId>,
    #[serde(default, deserialize_with = "amount_opt", skip_serializing_if = "Option::is_none")]
    pub opening_balance: Option<f64>,
    #[serde(default, deserialize_with = "amount_opt", skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    #[serde(default, deserialize_with = "amount_opt", skip_serializing_if = "Option::is_none")]
    pub total_debit: Option<f64>,
    #[serde(default, deserialize_with = "amount_opt", skip_serializing_if = "Option::is_none")]
    pub total_credit: Option<f64>,
    #[serde(default, deserialize_with = "amount_opt", skip_serializing_if = "Option::is_none")]
    pub total_balance: Option<f64>,
    #[serde(default, deserialize_with = "count_opt", skip_serializing_if = "Option::is_none")]
    pub transaction_count: Option<u64>,
    #[serde(default = "default_active", deserialize_with = "flag")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AccountRecord>,
}

fn default_active() -> bool {
    true
}

impl AccountRecord {
    /// Creates an active root account with no balances attached.
    pub fn new(
        id: impl Into<AccountId>,
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            account_type,
            parent_id: None,
            opening_balance: None,
            balance: None,
            total_debit: None,
            total_credit: None,
            total_balance: None,
            transaction_count: None,
            is_active: true,
            description: None,
            children: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<AccountId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_opening_balance(mut self, amount: f64) -> Self {
        self.opening_balance = Some(amount);
        self
    }

    pub fn with_balance(mut self, amount: f64) -> Self {
        self.balance = Some(amount);
        self
    }

    pub fn with_children(mut self, children: Vec<AccountRecord>) -> Self {
        self.children = children;
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Value shown in the "balance" column: `balance`, then `opening_balance`, then 0.
///
/// A present zero is a real balance and stops the chain.
pub fn display_balance(record: &AccountRecord) -> f64 {
    record.balance.or(record.opening_balance).unwrap_or(0.0)
}

/// Value shown in the subtree-total column: `total_balance`, then [`display_balance`].
pub fn display_total_balance(record: &AccountRecord) -> f64 {
    record.total_balance.unwrap_or_else(|| display_balance(record))
}

/// Suggests the next free code for `account_type`.
///
/// Codes of the same type are reduced to their digits; the highest one (at
/// least `prefix * 1000`) is incremented. The first asset code is `1001`.
/// Codes too long for a `u64` count as `u64::MAX` and the result saturates
/// there.
pub fn next_account_code(account_type: AccountType, records: &[AccountRecord]) -> String {
    let base = u64::from(account_type.code_prefix()) * 1000;
    let highest = records
        .iter()
        .filter(|record| record.account_type == account_type)
        .filter_map(|record| code_number(&record.code))
        .fold(base, u64::max);
    format!("{:03}", highest.saturating_add(1))
}

fn code_number(code: &str) -> Option<u64> {
    let digits: String = code.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    // Only overflow can fail once the string is all digits.
    Some(digits.parse::<u64>().unwrap_or(u64::MAX))
}

/// Accepts amounts as JSON numbers, numeric strings, or null.
pub(crate) fn amount_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
    }

    match Option::<RawAmount>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawAmount::Number(value)) => Ok(Some(value)),
        Some(RawAmount::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("invalid amount `{}`", text)))
        }
    }
}

/// Reads a flag the way the backend's loose columns send it: a bool, a
/// `0`/`1` integer, or a string such as `"true"`, `"1"` or `"0"`.
///
/// `null` reads as false.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Bool(bool),
        Number(f64),
        Text(String),
    }

    match Option::<RawFlag>::deserialize(deserializer)? {
        None => Ok(false),
        Some(RawFlag::Bool(value)) => Ok(value),
        Some(RawFlag::Number(value)) => Ok(value != 0.0),
        Some(RawFlag::Text(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "y" => Ok(true),
            "0" | "false" | "no" | "n" | "" => Ok(false),
            _ => Err(serde::de::Error::custom(format!("invalid flag `{}`", text))),
        },
    }
}

/// Accepts counts as non-negative JSON integers, numeric strings, or null.
fn count_opt<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCount {
        Number(u64),
        Text(String),
    }

    match Option::<RawCount>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawCount::Number(value)) => Ok(Some(value)),
        Some(RawCount::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<u64>()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("invalid count `{}`", text)))
        }
    }
}
