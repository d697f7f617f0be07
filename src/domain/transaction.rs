use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::account::{amount_opt, AccountId};
use crate::domain::summary::DashboardSummary;

/// Side of the ledger a transaction posts to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Debit,
    Credit,
}

impl TransactionType {
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Debit => "debit",
            TransactionType::Credit => "credit",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "debit" => Some(TransactionType::Debit),
            "credit" => Some(TransactionType::Credit),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Account summary embedded in a transaction listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TransactionAccount {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
}

/// Transaction as listed by the bookkeeping API.
///
/// Identifiers use the same loose number-or-string encoding as accounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    pub id: AccountId,
    #[serde(deserialize_with = "calendar_date")]
    pub transaction_date: NaiveDate,
    #[serde(default)]
    pub description: String,
    pub account_id: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<TransactionAccount>,
    #[serde(default, deserialize_with = "amount_or_zero")]
    pub debit: f64,
    #[serde(default, deserialize_with = "amount_or_zero")]
    pub credit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TransactionRecord {
    pub fn new(
        id: impl Into<AccountId>,
        transaction_date: NaiveDate,
        description: impl Into<String>,
        account_id: impl Into<AccountId>,
    ) -> Self {
        Self {
            id: id.into(),
            transaction_date,
            description: description.into(),
            account_id: account_id.into(),
            account: None,
            debit: 0.0,
            credit: 0.0,
            notes: None,
        }
    }

    pub fn with_debit(mut self, amount: f64) -> Self {
        self.debit = amount;
        self
    }

    pub fn with_credit(mut self, amount: f64) -> Self {
        self.credit = amount;
        self
    }

    pub fn with_account(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.account = Some(TransactionAccount {
            code: code.into(),
            name: name.into(),
        });
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// A positive debit makes a debit transaction; anything else is a credit.
    pub fn kind(&self) -> TransactionType {
        if self.debit > 0.0 {
            TransactionType::Debit
        } else {
            TransactionType::Credit
        }
    }

    /// The amount on the transaction's own side.
    pub fn amount(&self) -> f64 {
        match self.kind() {
            TransactionType::Debit => self.debit,
            TransactionType::Credit => self.credit,
        }
    }

    /// `code - name` of the embedded account, or the bare account id.
    pub fn account_label(&self) -> String {
        match &self.account {
            Some(account) if !account.code.is_empty() => {
                format!("{} - {}", account.code, account.name)
            }
            Some(account) if !account.name.is_empty() => account.name.clone(),
            _ => self.account_id.to_string(),
        }
    }
}

/// Newest first; transactions on the same day keep their listing order.
pub fn recent_transactions(records: &[TransactionRecord], limit: usize) -> Vec<&TransactionRecord> {
    let mut recent: Vec<&TransactionRecord> = records.iter().collect();
    recent.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date));
    recent.truncate(limit);
    recent
}

impl DashboardSummary {
    /// Debit and credit totals over `records`; net is debit minus credit.
    pub fn from_transactions(records: &[TransactionRecord]) -> Self {
        let total_debit: f64 = records.iter().map(|record| record.debit).sum();
        let total_credit: f64 = records.iter().map(|record| record.credit).sum();
        Self {
            total_debit: Some(total_debit),
            total_credit: Some(total_credit),
            net_amount: Some(total_debit - total_credit),
        }
    }
}

/// Filters offered by the transaction listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub account_id: Option<AccountId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub search: Option<String>,
    pub transaction_type: Option<TransactionType>,
}

impl TransactionFilter {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Date bounds are inclusive. `search` is matched case-insensitively
    /// against the description, the notes, and the embedded account.
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        if let Some(account_id) = &self.account_id {
            if &record.account_id != account_id {
                return false;
            }
        }
        if self.start_date.is_some_and(|start| record.transaction_date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| record.transaction_date > end) {
            return false;
        }
        match self.transaction_type {
            Some(TransactionType::Debit) if record.debit <= 0.0 => return false,
            Some(TransactionType::Credit) if record.credit <= 0.0 => return false,
            _ => {}
        }
        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => {
                let needle = needle.to_lowercase();
                let account = record.account.as_ref();
                [
                    Some(record.description.as_str()),
                    record.notes.as_deref(),
                    account.map(|account| account.code.as_str()),
                    account.map(|account| account.name.as_str()),
                ]
                .into_iter()
                .flatten()
                .any(|haystack| haystack.to_lowercase().contains(&needle))
            }
            _ => true,
        }
    }

    pub fn retain(&self, records: Vec<TransactionRecord>) -> Vec<TransactionRecord> {
        records.into_iter().filter(|record| self.matches(record)).collect()
    }

    /// Query parameters understood by the transaction endpoint. Unset
    /// filters are sent as empty strings.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let date = |value: Option<NaiveDate>| {
            value
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        };
        vec![
            (
                "account_id",
                self.account_id
                    .as_ref()
                    .map(AccountId::to_string)
                    .unwrap_or_default(),
            ),
            ("start_date", date(self.start_date)),
            ("end_date", date(self.end_date)),
            ("search", self.search.clone().unwrap_or_default()),
            (
                "transaction_type",
                self.transaction_type
                    .map(|kind| kind.label().to_string())
                    .unwrap_or_default(),
            ),
        ]
    }
}

/// Reads `YYYY-MM-DD`, ignoring any time part that follows it.
fn calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    let day = text.get(..10).unwrap_or(&text);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|_| serde::de::Error::custom(format!("invalid date `{}`", text)))
}

fn amount_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(amount_opt(deserializer)?.unwrap_or(0.0))
}
