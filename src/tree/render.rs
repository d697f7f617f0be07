use crate::domain::account::{display_balance, display_total_balance, AccountId, AccountType};
use crate::tree::expansion::ExpansionSet;
use crate::tree::model::AccountNode;

/// Indentation per depth level, in pixels or terminal columns.
pub const DEFAULT_INDENT: u16 = 24;

/// A visible line of the account tree, ready for display.
///
/// Balances are already resolved through the shared display precedence, so
/// every view that renders rows shows the same figures.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: AccountId,
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    pub is_active: bool,
    pub balance: f64,
    pub total_debit: f64,
    pub total_credit: f64,
    pub total_balance: f64,
    pub transaction_count: u64,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
}

impl Row {
    fn from_node(node: &AccountNode, expansion: &ExpansionSet) -> Self {
        let record = &node.record;
        let has_children = node.has_children();
        Self {
            id: record.id.clone(),
            code: record.code.clone(),
            name: record.name.clone(),
            account_type: record.account_type,
            is_active: record.is_active,
            balance: display_balance(record),
            total_debit: record.total_debit.unwrap_or(0.0),
            total_credit: record.total_credit.unwrap_or(0.0),
            total_balance: display_total_balance(record),
            transaction_count: record.transaction_count.unwrap_or(0),
            depth: node.depth,
            has_children,
            expanded: has_children && expansion.is_expanded(&record.id),
        }
    }

    /// Leading offset for this row given the per-level `unit`.
    pub fn indent(&self, unit: u16) -> usize {
        self.depth * usize::from(unit)
    }
}

/// Flattens the visible part of `forest` into rows, depth first.
///
/// Every node reached gets a row; descendants are only visited below nodes
/// that have children and are expanded.
pub fn render(forest: &[AccountNode], expansion: &ExpansionSet) -> Vec<Row> {
    let mut rows = Vec::new();
    push_rows(forest, expansion, &mut rows);
    rows
}

fn push_rows(nodes: &[AccountNode], expansion: &ExpansionSet, rows: &mut Vec<Row>) {
    for node in nodes {
        let row = Row::from_node(node, expansion);
        let descend = row.expanded;
        rows.push(row);
        if descend {
            push_rows(&node.children, expansion, rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::AccountRecord;
    use crate::tree::build_tree;

    fn chart() -> Vec<AccountNode> {
        build_tree(&[
            AccountRecord::new(1, "1000", "Assets", AccountType::Asset),
            AccountRecord::new(2, "1100", "Current", AccountType::Asset).with_parent(1),
            AccountRecord::new(3, "1101", "Cash", AccountType::Asset).with_parent(2),
            AccountRecord::new(4, "1200", "Fixed", AccountType::Asset).with_parent(1),
            AccountRecord::new(5, "2000", "Liabilities", AccountType::Liability),
        ])
    }

    fn codes(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(|row| row.code.as_str()).collect()
    }

    #[test]
    fn collapsed_forest_shows_only_roots() {
        let rows = render(&chart(), &ExpansionSet::new());
        assert_eq!(codes(&rows), vec!["1000", "2000"]);
        assert!(rows[0].has_children);
        assert!(!rows[0].expanded);
        assert!(!rows[1].has_children);
    }

    #[test]
    fn expanded_nodes_reveal_children_in_source_order() {
        let mut expansion = ExpansionSet::new();
        expansion.toggle(&AccountId::Number(1));
        let rows = render(&chart(), &expansion);
        assert_eq!(codes(&rows), vec!["1000", "1100", "1200", "2000"]);
        assert_eq!(rows[1].depth, 1);
        assert_eq!(rows[1].indent(DEFAULT_INDENT), 24);
    }

    #[test]
    fn expanded_descendant_under_collapsed_ancestor_stays_hidden() {
        let mut expansion = ExpansionSet::new();
        expansion.toggle(&AccountId::Number(2));
        let rows = render(&chart(), &expansion);
        assert_eq!(codes(&rows), vec!["1000", "2000"]);

        expansion.toggle(&AccountId::Number(1));
        let rows = render(&chart(), &expansion);
        assert_eq!(codes(&rows), vec!["1000", "1100", "1101", "1200", "2000"]);
        assert_eq!(rows[2].indent(DEFAULT_INDENT), 48);
    }

    #[test]
    fn expanding_a_leaf_has_no_effect() {
        let mut expansion = ExpansionSet::new();
        expansion.toggle(&AccountId::Number(5));
        let rows = render(&chart(), &expansion);
        assert_eq!(codes(&rows), vec!["1000", "2000"]);
        assert!(!rows[1].expanded);
    }

    #[test]
    fn rendering_leaves_the_forest_untouched() {
        let forest = chart();
        let snapshot = forest.clone();
        let mut expansion = ExpansionSet::new();
        expansion.expand_all(&forest);
        let _ = render(&forest, &expansion);
        assert_eq!(forest, snapshot);
    }
}
