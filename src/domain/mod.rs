//! Account and transaction records, and the payload shapes of the bookkeeping API.

pub mod account;
pub mod payload;
pub mod summary;
pub mod transaction;

pub use account::{
    display_balance, display_total_balance, next_account_code, AccountId, AccountRecord,
    AccountType,
};
pub use payload::{decode_accounts, decode_financial_summary, decode_transactions};
pub use summary::{
    top_accounts, DashboardSummary, FinancialSummary, SummaryCard, SummaryFilter, TopAccount,
};
pub use transaction::{
    recent_transactions, TransactionAccount, TransactionFilter, TransactionRecord, TransactionType,
};
