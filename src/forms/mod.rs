//! Account and transaction entry forms.

pub mod account;
pub mod transaction;

pub use account::{parent_candidates, AccountDraft, AccountInput};
pub use transaction::{TransactionDraft, TransactionInput};
