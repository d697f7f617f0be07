use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::account::AccountId;
use crate::errors::{BookkeepingError, Result};
use crate::input::AmountField;

/// Transaction fields as sent to the API.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TransactionInput {
    pub transaction_date: NaiveDate,
    pub description: String,
    pub account_id: AccountId,
    pub debit: f64,
    pub credit: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// In-progress transaction form with one debit and one credit field.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub transaction_date: NaiveDate,
    pub description: String,
    pub account_id: Option<AccountId>,
    pub debit: AmountField,
    pub credit: AmountField,
    pub notes: String,
}

impl TransactionDraft {
    pub fn new(transaction_date: NaiveDate, fallback: f64) -> Self {
        Self {
            transaction_date,
            description: String::new(),
            account_id: None,
            debit: AmountField::new(fallback),
            credit: AmountField::new(fallback),
            notes: String::new(),
        }
    }

    /// Resolves both amount fields and validates the draft.
    ///
    /// At least one of debit or credit must be positive.
    pub fn submit(&mut self) -> Result<TransactionInput> {
        let debit = self.debit.blur();
        let credit = self.credit.blur();
        if debit <= 0.0 && credit <= 0.0 {
            return Err(BookkeepingError::Validation(
                "either debit or credit must be filled in".into(),
            ));
        }
        let account_id = self
            .account_id
            .clone()
            .ok_or_else(|| BookkeepingError::Validation("an account must be selected".into()))?;
        let description = self.description.trim();
        if description.is_empty() {
            return Err(BookkeepingError::Validation("description is required".into()));
        }
        let notes = self.notes.trim();
        Ok(TransactionInput {
            transaction_date: self.transaction_date,
            description: description.to_string(),
            account_id,
            debit,
            credit,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::EditKey;

    fn draft() -> TransactionDraft {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
        let mut draft = TransactionDraft::new(date, 0.0);
        draft.description = "Office rent".into();
        draft.account_id = Some(AccountId::Number(12));
        draft
    }

    #[test]
    fn requires_a_positive_side() {
        let mut empty = draft();
        let err = empty.submit().expect_err("no amounts");
        assert!(err.to_string().contains("debit or credit"));

        let mut negative = draft();
        negative.debit.set_text("-5");
        assert!(negative.submit().is_err());
    }

    #[test]
    fn typed_debit_is_submitted() {
        let mut draft = draft();
        for key in [EditKey::Char('2'), EditKey::Char('5'), EditKey::Char('0')] {
            draft.debit.handle_key(key);
        }
        draft.credit.handle_key(EditKey::Char('-'));
        let input = draft.submit().expect("valid draft");
        assert_eq!(input.debit, 250.0);
        assert_eq!(input.credit, 0.0);
        assert_eq!(input.notes, None);

        let json = serde_json::to_value(&input).expect("serialize");
        assert_eq!(json["transaction_date"], "2024-03-01");
        assert_eq!(json["account_id"], 12);
    }

    #[test]
    fn requires_account_and_description() {
        let mut no_account = draft();
        no_account.account_id = None;
        no_account.credit.set_text("10");
        assert!(no_account.submit().expect_err("account").to_string().contains("account"));

        let mut no_description = draft();
        no_description.description = "   ".into();
        no_description.credit.set_text("10");
        assert!(no_description
            .submit()
            .expect_err("description")
            .to_string()
            .contains("description"));
    }
}
