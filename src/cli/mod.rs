pub mod browser;
pub mod navigation;
pub mod output;
pub mod table;
pub mod views;

use std::{
    fs,
    io::IsTerminal,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use tracing::debug;

use crate::cli::browser::{BrowseResult, TreeBrowser};
use crate::cli::output::OutputPreferences;
use crate::cli::views::{
    accounts_table, cards_table, recent_transactions_table, summary_table, top_accounts_table,
    transactions_table, ViewSettings,
};
use crate::config::{Config, ConfigManager};
use crate::currency::format_currency;
use crate::domain::{
    decode_accounts, decode_financial_summary, decode_transactions, recent_transactions,
    top_accounts, AccountId, AccountType, DashboardSummary, SummaryFilter, TransactionFilter,
    TransactionType,
};
use crate::errors::{BookkeepingError, Result};
use crate::input::on_blur;
use crate::tree::{into_tree, render, AccountNode, ExpansionSet};

const TOP_ACCOUNT_LIMIT: usize = 5;

const USAGE: &str = "bookkeeping_cli <command> [options]

Commands:
  accounts <file>      Show the chart of accounts from a JSON listing
  summary <file>       Show balances, totals and top accounts
  browse <file>        Browse the account tree interactively
  transactions <file>  List transactions with their debit and credit totals
  amount <text>        Resolve amount text the way an amount field does on blur

Options:
  --expand-all         Start with every parent account expanded
  --plain              ASCII output without colour
  --type <type>        Only accounts of this type (asset, liability, ...)
  --show-inactive      Include inactive accounts in the summary

Transaction options:
  --account <id>       Only transactions posted to this account
  --from <YYYY-MM-DD>  Only transactions on or after this day
  --to <YYYY-MM-DD>    Only transactions on or before this day
  --search <text>      Match description, notes or account
  --kind <kind>        Only debit or credit transactions
  --recent <n>         Show the newest <n> transactions as a feed";

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Accounts(PathBuf),
    Summary(PathBuf),
    Browse(PathBuf),
    Transactions(PathBuf),
    Amount(String),
    Help,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Options {
    expand_all: bool,
    plain: bool,
    account_type: Option<AccountType>,
    show_inactive: bool,
    transactions: TransactionFilter,
    recent: Option<usize>,
}

fn flag_value<I>(args: &mut I, flag: &str) -> Result<String>
where
    I: Iterator<Item = String>,
{
    args.next()
        .ok_or_else(|| BookkeepingError::Usage(format!("{} needs a value", flag)))
}

fn parse_date(raw: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        BookkeepingError::Usage(format!("{} expects YYYY-MM-DD, got `{}`", flag, raw))
    })
}

fn parse_args<I>(args: I) -> Result<(Command, Options)>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut positional = Vec::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--expand-all" => options.expand_all = true,
            "--plain" => options.plain = true,
            "--show-inactive" => options.show_inactive = true,
            "--type" => {
                let raw = flag_value(&mut args, "--type")?;
                let kind = AccountType::parse(&raw).ok_or_else(|| {
                    BookkeepingError::Usage(format!("unknown account type `{}`", raw))
                })?;
                options.account_type = Some(kind);
            }
            "--account" => {
                let raw = flag_value(&mut args, "--account")?;
                options.transactions.account_id = Some(AccountId::from(raw.trim()));
            }
            "--from" => {
                let raw = flag_value(&mut args, "--from")?;
                options.transactions.start_date = Some(parse_date(&raw, "--from")?);
            }
            "--to" => {
                let raw = flag_value(&mut args, "--to")?;
                options.transactions.end_date = Some(parse_date(&raw, "--to")?);
            }
            "--search" => {
                options.transactions.search = Some(flag_value(&mut args, "--search")?);
            }
            "--kind" => {
                let raw = flag_value(&mut args, "--kind")?;
                let kind = TransactionType::parse(&raw).ok_or_else(|| {
                    BookkeepingError::Usage(format!("unknown transaction kind `{}`", raw))
                })?;
                options.transactions.transaction_type = Some(kind);
            }
            "--recent" => {
                let raw = flag_value(&mut args, "--recent")?;
                let count = raw.trim().parse::<usize>().map_err(|_| {
                    BookkeepingError::Usage(format!("--recent expects a count, got `{}`", raw))
                })?;
                options.recent = Some(count);
            }
            "-h" | "--help" => return Ok((Command::Help, options)),
            flag if flag.starts_with("--") => {
                return Err(BookkeepingError::Usage(format!("unknown option `{}`", flag)));
            }
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let command = match positional.next().as_deref() {
        None | Some("help") => Command::Help,
        Some(name @ ("accounts" | "summary" | "browse" | "transactions")) => {
            let path = positional
                .next()
                .map(PathBuf::from)
                .ok_or_else(|| BookkeepingError::Usage(format!("{} <file>", name)))?;
            match name {
                "accounts" => Command::Accounts(path),
                "summary" => Command::Summary(path),
                "transactions" => Command::Transactions(path),
                _ => Command::Browse(path),
            }
        }
        Some("amount") => Command::Amount(positional.next().unwrap_or_default()),
        Some(other) => {
            return Err(BookkeepingError::Usage(format!(
                "unknown command `{}`; run `bookkeeping_cli help`",
                other
            )))
        }
    };

    if let Some(extra) = positional.next() {
        return Err(BookkeepingError::Usage(format!("unexpected argument `{}`", extra)));
    }
    Ok((command, options))
}

/// Entry point of the `bookkeeping_cli` binary. `args` excludes the program name.
pub fn run_cli<I>(args: I) -> Result<()>
where
    I: IntoIterator<Item = String>,
{
    let (command, options) = parse_args(args)?;
    let config = ConfigManager::new()?.load()?;

    let prefs = OutputPreferences {
        plain_mode: options.plain || config.plain_mode,
        color_enabled: std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    };
    output::set_preferences(prefs);
    let settings = ViewSettings::from(&config);
    debug!("running {:?}", command);

    match command {
        Command::Help => {
            output::info(USAGE);
            Ok(())
        }
        Command::Accounts(path) => show_accounts(&path, &options, &settings, &prefs),
        Command::Summary(path) => show_summary(&path, &options, &settings, &prefs),
        Command::Browse(path) => browse(&path, &options, &settings, &prefs),
        Command::Transactions(path) => show_transactions(&path, &options, &settings),
        Command::Amount(text) => {
            show_amount(&text, &config);
            Ok(())
        }
    }
}

fn load_forest(path: &Path, filter: &SummaryFilter) -> Result<(String, Vec<AccountNode>)> {
    let json = fs::read_to_string(path)?;
    let records = decode_accounts(&json)?;
    let forest = filter.retain(into_tree(records));
    Ok((json, forest))
}

fn initial_expansion(forest: &[AccountNode], options: &Options) -> ExpansionSet {
    let mut expansion = ExpansionSet::new();
    if options.expand_all {
        expansion.expand_all(forest);
    }
    expansion
}

fn show_accounts(
    path: &Path,
    options: &Options,
    settings: &ViewSettings,
    prefs: &OutputPreferences,
) -> Result<()> {
    // The accounts list carries a status column, so inactive accounts stay.
    let filter = SummaryFilter {
        account_type: options.account_type,
        show_inactive: true,
    };
    let (_, forest) = load_forest(path, &filter)?;
    if forest.is_empty() {
        output::warning("No accounts found.");
        return Ok(());
    }

    let rows = render(&forest, &initial_expansion(&forest, options));
    output::section("Chart of Accounts");
    output::info(accounts_table(&rows, settings, prefs).render());
    Ok(())
}

fn show_summary(
    path: &Path,
    options: &Options,
    settings: &ViewSettings,
    prefs: &OutputPreferences,
) -> Result<()> {
    let filter = SummaryFilter {
        account_type: options.account_type,
        show_inactive: options.show_inactive,
    };
    let (json, forest) = load_forest(path, &filter)?;

    if let Some(summary) = decode_financial_summary(&json)? {
        output::section("Financial Summary");
        output::info(cards_table(&summary.cards(), settings).render());
    }

    if forest.is_empty() {
        output::warning("No accounts match the current filter.");
        return Ok(());
    }

    let rows = render(&forest, &initial_expansion(&forest, options));
    output::section("Account Summary");
    output::info(summary_table(&rows, settings, prefs).render());

    output::section("Top Accounts");
    let ranked = top_accounts(&forest, TOP_ACCOUNT_LIMIT);
    output::info(top_accounts_table(&ranked, settings, prefs).render());
    Ok(())
}

fn browse(
    path: &Path,
    options: &Options,
    settings: &ViewSettings,
    prefs: &OutputPreferences,
) -> Result<()> {
    if !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
        return Err(BookkeepingError::Usage(
            "browse needs an interactive terminal; use `accounts` instead".into(),
        ));
    }

    let filter = SummaryFilter {
        account_type: options.account_type,
        show_inactive: true,
    };
    let (_, forest) = load_forest(path, &filter)?;
    let mut browser = TreeBrowser::with_expansion(&forest, initial_expansion(&forest, options));

    match browser.run(settings, prefs) {
        BrowseResult::Selected(id) => {
            if let Some(row) = browser.rows().into_iter().find(|row| row.id == id) {
                output::info(format!(
                    "{} {} ({})",
                    row.code,
                    row.name,
                    format_currency(row.balance, &settings.currency)
                ));
            }
        }
        BrowseResult::Empty => output::warning("No accounts found."),
        BrowseResult::Closed => {}
    }
    Ok(())
}

fn show_transactions(path: &Path, options: &Options, settings: &ViewSettings) -> Result<()> {
    let json = fs::read_to_string(path)?;
    let records = options.transactions.retain(decode_transactions(&json)?);
    debug!("{} transactions after filtering", records.len());
    if records.is_empty() {
        output::warning("No transactions match the current filter.");
        return Ok(());
    }

    match options.recent {
        Some(limit) => {
            output::section("Recent Transactions");
            let recent = recent_transactions(&records, limit);
            output::info(recent_transactions_table(&recent, settings).render());
        }
        None => {
            output::section("Transactions");
            let listed: Vec<_> = records.iter().collect();
            output::info(transactions_table(&listed, settings).render());
        }
    }

    output::section("Transaction Totals");
    let totals = DashboardSummary::from_transactions(&records);
    output::info(cards_table(&totals.cards(), settings).render());
    Ok(())
}

fn show_amount(text: &str, config: &Config) {
    let value = on_blur(text, config.default_amount);
    output::info(format!(
        "{}\t{}",
        value,
        format_currency(value, &config.currency)
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn parses_commands_and_flags() {
        let (command, options) =
            parse_args(args(&["summary", "chart.json", "--type", "asset", "--expand-all"]))
                .expect("valid arguments");
        assert_eq!(command, Command::Summary(PathBuf::from("chart.json")));
        assert_eq!(options.account_type, Some(AccountType::Asset));
        assert!(options.expand_all);
        assert!(!options.show_inactive);
    }

    #[test]
    fn parses_transaction_filters() {
        let (command, options) = parse_args(args(&[
            "transactions",
            "ledger.json",
            "--account",
            "5",
            "--from",
            "2024-03-01",
            "--to",
            "2024-03-31",
            "--search",
            "rent",
            "--kind",
            "Debit",
            "--recent",
            "5",
        ]))
        .expect("valid arguments");
        assert_eq!(command, Command::Transactions(PathBuf::from("ledger.json")));
        let filter = &options.transactions;
        assert_eq!(filter.account_id, Some(AccountId::Number(5)));
        assert_eq!(filter.start_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(filter.end_date, NaiveDate::from_ymd_opt(2024, 3, 31));
        assert_eq!(filter.search.as_deref(), Some("rent"));
        assert_eq!(filter.transaction_type, Some(TransactionType::Debit));
        assert_eq!(options.recent, Some(5));
    }

    #[test]
    fn negative_amounts_are_not_flags() {
        let (command, _) = parse_args(args(&["amount", "-12.5"])).expect("amount");
        assert_eq!(command, Command::Amount("-12.5".into()));
    }

    #[test]
    fn no_arguments_shows_help() {
        let (command, _) = parse_args(Vec::new()).expect("help");
        assert_eq!(command, Command::Help);
    }

    #[test]
    fn usage_errors() {
        for bad in [
            args(&["accounts"]),
            args(&["ledger"]),
            args(&["accounts", "a.json", "--type"]),
            args(&["accounts", "a.json", "--type", "cash"]),
            args(&["accounts", "a.json", "--verbose"]),
            args(&["accounts", "a.json", "b.json"]),
            args(&["transactions"]),
            args(&["transactions", "t.json", "--from", "03/01/2024"]),
            args(&["transactions", "t.json", "--kind", "transfer"]),
            args(&["transactions", "t.json", "--recent", "few"]),
        ] {
            let err = parse_args(bad).expect_err("usage error");
            assert!(matches!(err, BookkeepingError::Usage(_)));
        }
    }
}
