use serde::Serialize;

use crate::domain::account::{next_account_code, AccountId, AccountRecord, AccountType};
use crate::errors::{BookkeepingError, Result};
use crate::input::AmountField;

/// Account fields as sent to the API on create or update.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AccountInput {
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub parent_id: Option<AccountId>,
    pub opening_balance: f64,
    pub description: String,
    pub is_active: bool,
}

/// In-progress account form.
#[derive(Debug, Clone)]
pub struct AccountDraft {
    editing: Option<AccountId>,
    pub code: String,
    pub name: String,
    account_type: AccountType,
    pub parent_id: Option<AccountId>,
    pub opening_balance: AmountField,
    pub description: String,
    pub is_active: bool,
}

impl AccountDraft {
    /// Blank form with an auto-generated code for `account_type`.
    pub fn for_new(account_type: AccountType, existing: &[AccountRecord], fallback: f64) -> Self {
        Self {
            editing: None,
            code: next_account_code(account_type, existing),
            name: String::new(),
            account_type,
            parent_id: None,
            opening_balance: AmountField::new(fallback),
            description: String::new(),
            is_active: true,
        }
    }

    /// Form pre-filled from `record`; code and type stay fixed.
    pub fn for_edit(record: &AccountRecord, fallback: f64) -> Self {
        Self {
            editing: Some(record.id.clone()),
            code: record.code.clone(),
            name: record.name.clone(),
            account_type: record.account_type,
            parent_id: record.parent_id.clone(),
            opening_balance: AmountField::with_value(
                record.opening_balance.unwrap_or(fallback),
                fallback,
            ),
            description: record.description.clone().unwrap_or_default(),
            is_active: record.is_active,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    /// Changes the type of a new account and regenerates its code.
    ///
    /// Existing accounts keep their type.
    pub fn set_type(&mut self, account_type: AccountType, existing: &[AccountRecord]) -> bool {
        if self.is_editing() {
            return false;
        }
        self.account_type = account_type;
        self.code = next_account_code(account_type, existing);
        true
    }

    /// Validates the draft and resolves the opening balance.
    pub fn submit(&mut self) -> Result<AccountInput> {
        let opening_balance = self.opening_balance.blur();
        let name = self.name.trim();
        if name.is_empty() {
            return Err(BookkeepingError::Validation("account name is required".into()));
        }
        if let (Some(editing), Some(parent)) = (&self.editing, &self.parent_id) {
            if editing == parent {
                return Err(BookkeepingError::Validation(
                    "an account cannot be its own parent".into(),
                ));
            }
        }
        Ok(AccountInput {
            code: self.code.clone(),
            name: name.to_string(),
            account_type: self.account_type,
            parent_id: self.parent_id.clone(),
            opening_balance,
            description: self.description.trim().to_string(),
            is_active: self.is_active,
        })
    }
}

/// Accounts offered as parents: active roots only.
pub fn parent_candidates(records: &[AccountRecord]) -> Vec<&AccountRecord> {
    records
        .iter()
        .filter(|record| record.is_active && record.is_root())
        .collect()
}
