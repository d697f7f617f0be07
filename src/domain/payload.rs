use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::account::AccountRecord;
use crate::domain::summary::FinancialSummary;
use crate::domain::transaction::TransactionRecord;
use crate::errors::{BookkeepingError, Result};

/// Finds the record list inside one of the envelopes the API hands out:
/// `{"<key>": [...]}`, `{"data": [...]}`, `{"data": {"<key>": [...]}}`, or a
/// bare array.
fn unwrap_listing(value: Value, key: &str) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(mut map) => {
            if let Some(Value::Array(items)) = map.remove(key) {
                return Some(items);
            }
            match map.remove("data")? {
                Value::Array(items) => Some(items),
                Value::Object(mut data) => match data.remove(key)? {
                    Value::Array(items) => Some(items),
                    _ => None,
                },
                _ => None,
            }
        }
        _ => None,
    }
}

/// Decodes every entry on its own so that a bad field is reported with its
/// position instead of failing the envelope as a whole.
fn decode_listing<T: DeserializeOwned>(json: &str, key: &str, noun: &str) -> Result<Vec<T>> {
    let value: Value = serde_json::from_str(json)?;
    let items = unwrap_listing(value, key).ok_or_else(|| {
        BookkeepingError::InvalidRecord(format!("unrecognised {} payload", noun))
    })?;
    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            serde_json::from_value(item).map_err(|err| {
                BookkeepingError::InvalidRecord(format!("{} #{}: {}", noun, idx + 1, err))
            })
        })
        .collect()
}

/// Decodes an account listing, flat or pre-nested.
///
/// Accepts `{"accounts": [...]}`, `{"data": [...]}`,
/// `{"data": {"accounts": [...]}}`, or a bare array.
pub fn decode_accounts(json: &str) -> Result<Vec<AccountRecord>> {
    decode_listing(json, "accounts", "account")
}

/// Decodes a transaction listing from the same envelopes as
/// [`decode_accounts`], keyed by `transactions`.
pub fn decode_transactions(json: &str) -> Result<Vec<TransactionRecord>> {
    decode_listing(json, "transactions", "transaction")
}

/// Extracts the `financial_summary` block of a summary payload, if any.
///
/// Looked up at the top level first, then inside a `data` envelope.
pub fn decode_financial_summary(json: &str) -> Result<Option<FinancialSummary>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let block = value
        .get("financial_summary")
        .or_else(|| value.get("data").and_then(|data| data.get("financial_summary")));
    match block {
        Some(block) if !block.is_null() => Ok(Some(serde_json::from_value(block.clone())?)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::AccountId;

    #[test]
    fn decodes_flat_listing() {
        let json = r#"{"accounts": [
            {"id": 1, "code": "1000", "name": "Assets", "type": "asset", "parent_id": null, "opening_balance": 0, "is_active": true},
            {"id": 2, "code": "1001", "name": "Cash", "type": "asset", "parent_id": 1, "opening_balance": 250, "is_active": true}
        ]}"#;
        let accounts = decode_accounts(json).expect("flat payload");
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[1].parent_id, Some(AccountId::Number(1)));
    }

    #[test]
    fn decodes_nested_summary_inside_data_envelope() {
        let json = r#"{"data": {"accounts": [
            {"id": 1, "code": "1000", "name": "Assets", "type": "asset", "total_balance": "900",
             "children": [{"id": 2, "code": "1001", "name": "Cash", "type": "asset", "balance": 900}]}
        ]}}"#;
        let accounts = decode_accounts(json).expect("nested payload");
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].children.len(), 1);
        assert_eq!(accounts[0].total_balance, Some(900.0));
    }

    #[test]
    fn decodes_bare_arrays_and_data_lists() {
        let bare = r#"[{"id": 1, "name": "Cash", "type": "asset"}]"#;
        assert_eq!(decode_accounts(bare).expect("bare").len(), 1);
        let data = r#"{"data": [{"id": 1, "name": "Cash", "type": "asset"}]}"#;
        assert_eq!(decode_accounts(data).expect("data").len(), 1);
    }

    #[test]
    fn reports_unknown_shapes_as_invalid_records() {
        let err = decode_accounts(r#"{"rows": []}"#).expect_err("unknown envelope");
        assert!(matches!(err, BookkeepingError::InvalidRecord(_)));
    }

    #[test]
    fn field_errors_name_the_failing_entry() {
        let json = r#"{"accounts": [
            {"id": 1, "name": "Cash", "type": "asset"},
            {"id": 2, "name": "Bank", "type": "asset", "balance": "lots"}
        ]}"#;
        let err = decode_accounts(json).expect_err("bad balance");
        let message = err.to_string();
        assert!(message.contains("account #2"), "{message}");
        assert!(message.contains("lots"), "{message}");
    }

    #[test]
    fn loosely_typed_columns_still_decode() {
        let json = r#"{"data": {"accounts": [
            {"id": "1", "name": "Cash", "type": "asset", "is_active": 1, "transaction_count": "3"},
            {"id": 2, "name": "Old", "type": "asset", "parent_id": "1", "is_active": "0"}
        ]}}"#;
        let accounts = decode_accounts(json).expect("loose payload");
        assert!(accounts[0].is_active);
        assert_eq!(accounts[0].transaction_count, Some(3));
        assert!(!accounts[1].is_active);
        assert_eq!(accounts[1].parent_id.as_ref(), Some(&accounts[0].id));
    }

    #[test]
    fn decodes_transaction_envelopes() {
        let nested = r#"{"data": {"transactions": [
            {"id": 1, "transaction_date": "2024-03-01", "description": "Rent",
             "account_id": 5, "debit": "0", "credit": "1500000"}
        ]}}"#;
        let transactions = decode_transactions(nested).expect("nested");
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].credit, 1_500_000.0);

        let top = r#"{"transactions": []}"#;
        assert!(decode_transactions(top).expect("empty").is_empty());

        let err = decode_transactions(r#"{"accounts": []}"#).expect_err("wrong listing");
        assert!(err.to_string().contains("unrecognised transaction payload"));
    }

    #[test]
    fn financial_summary_is_optional() {
        let with = r#"{"accounts": [], "financial_summary": {"total_assets": 10, "net_income": -2}}"#;
        let summary = decode_financial_summary(with).expect("decode").expect("present");
        assert_eq!(summary.total_assets, Some(10.0));
        assert_eq!(summary.total_equity, None);

        let nested = r#"{"data": {"financial_summary": {"total_equity": 4}}}"#;
        let summary = decode_financial_summary(nested).expect("decode").expect("present");
        assert_eq!(summary.total_equity, Some(4.0));

        assert_eq!(decode_financial_summary(r#"{"accounts": []}"#).expect("decode"), None);
    }

    #[test]
    fn reports_malformed_json_as_serde_error() {
        let err = decode_accounts("{not json").expect_err("malformed");
        assert!(matches!(err, BookkeepingError::Serde(_)));
    }
}
