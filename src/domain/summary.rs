use serde::{Deserialize, Serialize};

use crate::domain::account::{display_balance, AccountRecord, AccountType};
use crate::tree::AccountNode;

/// Titled figure shown as a dashboard card.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: f64,
}

/// Balance-sheet style totals computed by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FinancialSummary {
    #[serde(default)]
    pub total_assets: Option<f64>,
    #[serde(default)]
    pub total_liabilities: Option<f64>,
    #[serde(default)]
    pub total_equity: Option<f64>,
    #[serde(default)]
    pub net_income: Option<f64>,
}

impl FinancialSummary {
    pub fn cards(&self) -> Vec<SummaryCard> {
        vec![
            card("Total Asset", self.total_assets),
            card("Total Liability", self.total_liabilities),
            card("Total Equity", self.total_equity),
            card("Net Income", self.net_income),
        ]
    }
}

/// Transaction totals shown on the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    #[serde(default)]
    pub total_debit: Option<f64>,
    #[serde(default)]
    pub total_credit: Option<f64>,
    #[serde(default)]
    pub net_amount: Option<f64>,
}

impl DashboardSummary {
    pub fn cards(&self) -> Vec<SummaryCard> {
        vec![
            card("Total Debit", self.total_debit),
            card("Total Credit", self.total_credit),
            card("Net Amount", self.net_amount),
        ]
    }
}

fn card(title: &'static str, value: Option<f64>) -> SummaryCard {
    SummaryCard {
        title,
        value: value.unwrap_or(0.0),
    }
}

/// Entry of the "top accounts" ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct TopAccount {
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    pub balance: f64,
}

impl From<&AccountRecord> for TopAccount {
    fn from(record: &AccountRecord) -> Self {
        Self {
            code: record.code.clone(),
            name: record.name.clone(),
            account_type: record.account_type,
            balance: display_balance(record),
        }
    }
}

/// Ranks every account in `forest` by displayed balance, highest first.
///
/// Ties keep tree order.
pub fn top_accounts(forest: &[AccountNode], limit: usize) -> Vec<TopAccount> {
    fn collect<'a>(nodes: &'a [AccountNode], out: &mut Vec<&'a AccountRecord>) {
        for node in nodes {
            out.push(&node.record);
            collect(&node.children, out);
        }
    }

    let mut records = Vec::new();
    collect(forest, &mut records);
    let mut ranked: Vec<TopAccount> = records.into_iter().map(TopAccount::from).collect();
    ranked.sort_by(|a, b| b.balance.total_cmp(&a.balance));
    ranked.truncate(limit);
    ranked
}

/// Filters offered by the account summary view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryFilter {
    pub account_type: Option<AccountType>,
    pub show_inactive: bool,
}

impl SummaryFilter {
    pub fn matches(&self, record: &AccountRecord) -> bool {
        if !self.show_inactive && !record.is_active {
            return false;
        }
        match self.account_type {
            Some(kind) => record.account_type == kind,
            None => true,
        }
    }

    /// Drops every node that does not match, together with its subtree.
    pub fn retain(&self, nodes: Vec<AccountNode>) -> Vec<AccountNode> {
        nodes
            .into_iter()
            .filter(|node| self.matches(&node.record))
            .map(|mut node| {
                let children = std::mem::take(&mut node.children);
                node.children = self.retain(children);
                node
            })
            .collect()
    }

    /// Query parameters understood by the summary endpoints.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let account_type = self
            .account_type
            .map(|kind| kind.label().to_ascii_lowercase())
            .unwrap_or_default();
        vec![
            ("account_type", account_type),
            ("show_inactive", self.show_inactive.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build_tree;

    #[test]
    fn missing_totals_render_as_zero_cards() {
        let summary = FinancialSummary {
            total_assets: Some(1200.0),
            net_income: Some(-50.0),
            ..FinancialSummary::default()
        };
        let values: Vec<f64> = summary.cards().iter().map(|c| c.value).collect();
        assert_eq!(values, vec![1200.0, 0.0, 0.0, -50.0]);
        assert_eq!(summary.cards()[3].title, "Net Income");
    }

    #[test]
    fn dashboard_cards_deserialize_from_partial_payloads() {
        let summary: DashboardSummary =
            serde_json::from_str(r#"{"total_debit": 700, "net_amount": 250}"#).expect("payload");
        let cards = summary.cards();
        assert_eq!(cards[0].title, "Total Debit");
        assert_eq!(cards[1].value, 0.0);
        assert_eq!(cards[2].value, 250.0);
    }

    #[test]
    fn top_accounts_use_the_shared_balance_precedence() {
        let record = AccountRecord::new(4, "4001", "Sales", AccountType::Revenue)
            .with_opening_balance(10.0)
            .with_balance(0.0);
        assert_eq!(TopAccount::from(&record).balance, display_balance(&record));
    }

    #[test]
    fn top_accounts_rank_the_whole_tree() {
        let records = vec![
            AccountRecord::new(1, "1000", "Assets", AccountType::Asset).with_balance(50.0),
            AccountRecord::new(2, "1001", "Cash", AccountType::Asset)
                .with_parent(1)
                .with_balance(900.0),
            AccountRecord::new(3, "4001", "Sales", AccountType::Revenue)
                .with_opening_balance(300.0),
            AccountRecord::new(4, "5001", "Rent", AccountType::Expense).with_balance(300.0),
        ];
        let ranked = top_accounts(&build_tree(&records), 3);
        let codes: Vec<&str> = ranked.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, vec!["1001", "4001", "5001"]);
    }

    #[test]
    fn retain_prunes_inactive_subtrees() {
        let mut archived =
            AccountRecord::new(2, "1002", "Old Bank", AccountType::Asset).with_parent(1);
        archived.is_active = false;
        let records = vec![
            AccountRecord::new(1, "1000", "Assets", AccountType::Asset),
            archived,
            AccountRecord::new(3, "1003", "Old Bank Sub", AccountType::Asset).with_parent(2),
            AccountRecord::new(4, "1004", "Cash", AccountType::Asset).with_parent(1),
            AccountRecord::new(5, "2000", "Debts", AccountType::Liability),
        ];
        let forest = build_tree(&records);

        let kept = SummaryFilter::default().retain(forest.clone());
        assert_eq!(kept.iter().map(AccountNode::count).sum::<usize>(), 3);

        let assets_only = SummaryFilter {
            account_type: Some(AccountType::Asset),
            show_inactive: true,
        }
        .retain(forest);
        assert_eq!(assets_only.len(), 1);
        assert_eq!(assets_only[0].count(), 4);
    }

    #[test]
    fn query_pairs_use_wire_names() {
        let filter = SummaryFilter {
            account_type: Some(AccountType::Liability),
            show_inactive: false,
        };
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("account_type", "liability".to_string()),
                ("show_inactive", "false".to_string())
            ]
        );
    }
}
