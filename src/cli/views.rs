//! Table layouts for the accounts list, the account summary and the
//! transaction listings.
//!
//! Account layouts take their figures from [`Row`], so balance precedence is
//! decided once in the tree renderer and never re-derived here.

use crate::cli::output::{type_badge, OutputPreferences};
use crate::cli::table::{Alignment, Table, TableColumn};
use crate::config::Config;
use crate::currency::{format_currency, CurrencySettings};
use crate::domain::summary::{SummaryCard, TopAccount};
use crate::domain::transaction::{TransactionRecord, TransactionType};
use crate::tree::Row;

const NAME_MAX_WIDTH: usize = 48;
const DESCRIPTION_MAX_WIDTH: usize = 40;
const DATE_FORMAT: &str = "%-d %b %Y";

/// Display settings shared by every table.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSettings {
    pub currency: CurrencySettings,
    pub indent_width: u16,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ViewSettings {
    fn from(config: &Config) -> Self {
        Self {
            currency: config.currency.clone(),
            indent_width: config.indent_width,
        }
    }
}

fn expander(row: &Row, prefs: &OutputPreferences) -> &'static str {
    match (row.has_children, row.expanded, prefs.plain_mode) {
        (false, _, _) => " ",
        (true, true, false) => "▾",
        (true, false, false) => "▸",
        (true, true, true) => "v",
        (true, false, true) => ">",
    }
}

/// Indented name cell; leaves get a spacer where the expander would be.
pub fn account_cell(row: &Row, settings: &ViewSettings, prefs: &OutputPreferences) -> String {
    format!(
        "{}{} {} {}",
        " ".repeat(row.indent(settings.indent_width)),
        expander(row, prefs),
        row.code,
        row.name
    )
}

fn status_label(row: &Row) -> &'static str {
    if row.is_active {
        "Active"
    } else {
        "Inactive"
    }
}

/// Accounts list: name, type, balance, status.
pub fn accounts_table(rows: &[Row], settings: &ViewSettings, prefs: &OutputPreferences) -> Table {
    let mut table = Table::new(vec![
        TableColumn::new("Account", Alignment::Left).max_width(NAME_MAX_WIDTH),
        TableColumn::new("Type", Alignment::Left),
        TableColumn::new("Balance", Alignment::Right),
        TableColumn::new("Status", Alignment::Center),
    ]);
    for row in rows {
        table.push_row(vec![
            account_cell(row, settings, prefs),
            type_badge(row.account_type, prefs),
            format_currency(row.balance, &settings.currency),
            status_label(row).to_string(),
        ]);
    }
    table
}

/// Account summary: balances, debit and credit totals, subtree total, activity.
pub fn summary_table(rows: &[Row], settings: &ViewSettings, prefs: &OutputPreferences) -> Table {
    let mut table = Table::new(vec![
        TableColumn::new("Account", Alignment::Left).max_width(NAME_MAX_WIDTH),
        TableColumn::new("Type", Alignment::Left),
        TableColumn::new("Balance", Alignment::Right),
        TableColumn::new("Debit", Alignment::Right),
        TableColumn::new("Credit", Alignment::Right),
        TableColumn::new("Total", Alignment::Right),
        TableColumn::new("Transactions", Alignment::Center),
    ]);
    for row in rows {
        table.push_row(vec![
            account_cell(row, settings, prefs),
            type_badge(row.account_type, prefs),
            format_currency(row.balance, &settings.currency),
            format_currency(row.total_debit, &settings.currency),
            format_currency(row.total_credit, &settings.currency),
            format_currency(row.total_balance, &settings.currency),
            row.transaction_count.to_string(),
        ]);
    }
    table
}

pub fn cards_table(cards: &[SummaryCard], settings: &ViewSettings) -> Table {
    let mut table = Table::new(vec![
        TableColumn::new("Summary", Alignment::Left),
        TableColumn::new("Amount", Alignment::Right),
    ]);
    for card in cards {
        table.push_row(vec![
            card.title.to_string(),
            format_currency(card.value, &settings.currency),
        ]);
    }
    table
}

pub fn top_accounts_table(
    accounts: &[TopAccount],
    settings: &ViewSettings,
    prefs: &OutputPreferences,
) -> Table {
    let mut table = Table::new(vec![
        TableColumn::new("Top account", Alignment::Left).max_width(NAME_MAX_WIDTH),
        TableColumn::new("Type", Alignment::Left),
        TableColumn::new("Balance", Alignment::Right),
    ]);
    for account in accounts {
        table.push_row(vec![
            format!("{} {}", account.code, account.name),
            type_badge(account.account_type, prefs),
            format_currency(account.balance, &settings.currency),
        ]);
    }
    table
}

/// One side of a transaction; an empty side shows as `-`.
fn side_amount(amount: f64, settings: &ViewSettings) -> String {
    if amount > 0.0 {
        format_currency(amount, &settings.currency)
    } else {
        "-".to_string()
    }
}

/// Transaction listing: date, description, account, debit, credit.
pub fn transactions_table(records: &[&TransactionRecord], settings: &ViewSettings) -> Table {
    let mut table = Table::new(vec![
        TableColumn::new("Date", Alignment::Left),
        TableColumn::new("Description", Alignment::Left).max_width(DESCRIPTION_MAX_WIDTH),
        TableColumn::new("Account", Alignment::Left).max_width(NAME_MAX_WIDTH),
        TableColumn::new("Debit", Alignment::Right),
        TableColumn::new("Credit", Alignment::Right),
    ]);
    for record in records {
        table.push_row(vec![
            record.transaction_date.format(DATE_FORMAT).to_string(),
            record.description.clone(),
            record.account_label(),
            side_amount(record.debit, settings),
            side_amount(record.credit, settings),
        ]);
    }
    table
}

/// Dashboard feed: a signed amount per transaction, `+` for debits.
pub fn recent_transactions_table(records: &[&TransactionRecord], settings: &ViewSettings) -> Table {
    let mut table = Table::new(vec![
        TableColumn::new("Date", Alignment::Left),
        TableColumn::new("Description", Alignment::Left).max_width(DESCRIPTION_MAX_WIDTH),
        TableColumn::new("Account", Alignment::Left).max_width(NAME_MAX_WIDTH),
        TableColumn::new("Amount", Alignment::Right),
        TableColumn::new("Type", Alignment::Left),
    ]);
    for record in records {
        let sign = match record.kind() {
            TransactionType::Debit => '+',
            TransactionType::Credit => '-',
        };
        table.push_row(vec![
            record.transaction_date.format(DATE_FORMAT).to_string(),
            record.description.clone(),
            record.account_label(),
            format!("{}{}", sign, format_currency(record.amount(), &settings.currency)),
            record.kind().label().to_string(),
        ]);
    }
    table
}
