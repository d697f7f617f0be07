#![allow(dead_code)]

use std::path::{Path, PathBuf};

use bookkeeping_core::config::ConfigManager;
use bookkeeping_core::session::SessionStore;
use tempfile::TempDir;

pub const CHART_JSON: &str = r#"{
  "accounts": [
    {"id": 1, "code": "1000", "name": "Assets", "type": "asset", "parent_id": null, "opening_balance": 0},
    {"id": 2, "code": "1001", "name": "Cash", "type": "asset", "parent_id": 1, "opening_balance": "1500000"},
    {"id": 3, "code": "1002", "name": "Old Safe", "type": "asset", "parent_id": 1, "opening_balance": 0, "is_active": false},
    {"id": 4, "code": "2001", "name": "Bank Loan", "type": "liability", "parent_id": null, "opening_balance": 250000.5},
    {"id": 5, "code": "5001", "name": "Rent", "type": "expense", "parent_id": 77, "opening_balance": 1250}
  ],
  "financial_summary": {"total_assets": 1500000, "total_liabilities": 250000.5, "net_income": -1250}
}"#;

pub const TRANSACTIONS_JSON: &str = r#"{
  "data": {
    "transactions": [
      {"id": 1, "transaction_date": "2024-03-01", "description": "Opening capital", "account_id": 3, "account": {"code": "3001", "name": "Owner Equity"}, "debit": 0, "credit": "5000000"},
      {"id": 2, "transaction_date": "2024-03-04", "description": "Coffee beans", "account_id": "5", "account": {"code": "5001", "name": "Supplies"}, "debit": 45000, "credit": 0, "notes": "Arabica"},
      {"id": 3, "transaction_date": "2024-03-04", "description": "Office rent", "account_id": 6, "account": {"code": "5002", "name": "Rent"}, "debit": 1500000, "credit": 0},
      {"id": 4, "transaction_date": "2024-03-09T08:30:00Z", "description": "Catering sale", "account_id": 4, "account": {"code": "4001", "name": "Sales"}, "debit": 0, "credit": 750000},
      {"id": 5, "transaction_date": "2024-02-20", "description": "Stationery", "account_id": 5, "account": {"code": "5001", "name": "Supplies"}, "debit": "12000", "credit": null}
    ]
  }
}"#;

/// Isolated application directory; removed when dropped.
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_manager(&self) -> ConfigManager {
        ConfigManager::with_base_dir(self.path().to_path_buf()).expect("config manager")
    }

    pub fn session_store(&self) -> SessionStore {
        SessionStore::with_base_dir(self.path().to_path_buf()).expect("session store")
    }

    pub fn write_chart(&self, name: &str, json: &str) -> PathBuf {
        let path = self.path().join(name);
        std::fs::write(&path, json).expect("write chart");
        path
    }
}
