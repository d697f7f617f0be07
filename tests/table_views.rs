use std::sync::Once;

use bookkeeping_core::cli::browser::{BrowseResult, TreeBrowser};
use bookkeeping_core::cli::output::{set_preferences, OutputPreferences};
use bookkeeping_core::cli::views::{accounts_table, cards_table, ViewSettings};
use bookkeeping_core::domain::{AccountId, AccountRecord, AccountType, FinancialSummary};
use bookkeeping_core::tree::{build_tree, render, AccountNode, ExpansionSet};
use crossterm::event::KeyCode;
use insta::assert_snapshot;

fn plain() -> OutputPreferences {
    OutputPreferences {
        plain_mode: true,
        color_enabled: false,
    }
}

fn init_style() {
    static INIT: Once = Once::new();
    INIT.call_once(|| set_preferences(plain()));
}

fn chart() -> Vec<AccountNode> {
    let mut loan = AccountRecord::new(3, "2001", "Bank Loan", AccountType::Liability)
        .with_opening_balance(250_000.5);
    loan.is_active = false;
    build_tree(&[
        AccountRecord::new(1, "1000", "Assets", AccountType::Asset).with_opening_balance(0.0),
        AccountRecord::new(2, "1001", "Cash", AccountType::Asset)
            .with_parent(1)
            .with_opening_balance(1_500_000.0),
        loan,
    ])
}

#[test]
fn expanded_accounts_table_layout() {
    init_style();
    let forest = chart();
    let mut expansion = ExpansionSet::new();
    expansion.expand_all(&forest);

    let rows = render(&forest, &expansion);
    let mut table = accounts_table(&rows, &ViewSettings::default(), &plain());
    table.padding = 0;
    assert_snapshot!(table.render(), @r"
    Account          Type           Balance  Status
    ------------------------------------------------
    v 1000 Assets    Asset             Rp 0  Active
        1001 Cash    Asset     Rp 1.500.000  Active
      2001 Bank Loan Liability Rp 250.000,5 Inactive
    ");
}

#[test]
fn financial_summary_cards_layout() {
    init_style();
    let summary = FinancialSummary {
        total_assets: Some(1_500_000.0),
        total_liabilities: Some(250_000.5),
        total_equity: None,
        net_income: Some(-1250.0),
    };
    let mut table = cards_table(&summary.cards(), &ViewSettings::default());
    table.padding = 0;
    assert_snapshot!(table.render(), @r"
    Summary               Amount
    ----------------------------
    Total Asset     Rp 1.500.000
    Total Liability Rp 250.000,5
    Total Equity            Rp 0
    Net Income         -Rp 1.250
    ");
}

#[test]
fn browser_rows_match_the_static_table() {
    init_style();
    let forest = chart();
    let mut browser = TreeBrowser::new(&forest);
    let outcome = browser.run_simulated(&[KeyCode::Right, KeyCode::Down, KeyCode::Enter]);
    assert_eq!(outcome, BrowseResult::Selected(AccountId::Number(2)));

    let mut expansion = ExpansionSet::new();
    expansion.expand(&AccountId::Number(1));
    assert_eq!(browser.rows(), render(&forest, &expansion));
}
