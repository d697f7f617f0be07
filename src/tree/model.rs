use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::domain::account::{AccountId, AccountRecord};

/// One account placed in the chart-of-accounts forest.
///
/// `record.children` is always empty here; the nesting lives in `children`.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountNode {
    pub record: AccountRecord,
    pub depth: usize,
    pub children: Vec<AccountNode>,
}

impl AccountNode {
    pub fn id(&self) -> &AccountId {
        &self.record.id
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of nodes in this subtree, the node itself included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(AccountNode::count).sum::<usize>()
    }
}

/// Builds the account forest from a borrowed listing. See [`into_tree`].
pub fn build_tree(records: &[AccountRecord]) -> Vec<AccountNode> {
    into_tree(records.to_vec())
}

/// Builds the account forest, returning its roots.
///
/// When any record already carries `children` the listing is taken as
/// pre-nested and kept exactly as given. Otherwise nesting is derived from
/// `parent_id`; records whose parent is unknown become roots. A record that
/// repeats one of its own ancestors ends its branch instead of recursing.
pub fn into_tree(records: Vec<AccountRecord>) -> Vec<AccountNode> {
    if records.iter().any(|record| !record.children.is_empty()) {
        debug!("building account tree from {} pre-nested roots", records.len());
        let mut ancestors = HashSet::new();
        records
            .into_iter()
            .map(|record| wrap_nested(record, 0, &mut ancestors))
            .collect()
    } else {
        debug!("building account tree from {} flat records", records.len());
        build_flat(records)
    }
}

fn wrap_nested(
    mut record: AccountRecord,
    depth: usize,
    ancestors: &mut HashSet<AccountId>,
) -> AccountNode {
    let nested = std::mem::take(&mut record.children);
    if ancestors.contains(&record.id) {
        warn!(
            "account {} repeats one of its ancestors; its children are not shown",
            record.id
        );
        return AccountNode {
            record,
            depth,
            children: Vec::new(),
        };
    }

    ancestors.insert(record.id.clone());
    let children = nested
        .into_iter()
        .map(|child| wrap_nested(child, depth + 1, ancestors))
        .collect();
    ancestors.remove(&record.id);

    AccountNode {
        record,
        depth,
        children,
    }
}

fn build_flat(records: Vec<AccountRecord>) -> Vec<AccountNode> {
    let ids: Vec<AccountId> = records.iter().map(|record| record.id.clone()).collect();
    let known: HashSet<&AccountId> = ids.iter().collect();

    let mut groups: HashMap<AccountId, Vec<usize>> = HashMap::new();
    let mut roots = Vec::new();
    for (idx, record) in records.iter().enumerate() {
        match &record.parent_id {
            Some(parent) if known.contains(parent) => {
                groups.entry(parent.clone()).or_default().push(idx);
            }
            Some(parent) => {
                warn!(
                    "account {} references unknown parent {}; placing it at the root",
                    record.id, parent
                );
                roots.push(idx);
            }
            None => roots.push(idx),
        }
    }

    let mut builder = FlatBuilder {
        slots: records.into_iter().map(Some).collect(),
        ids: &ids,
        groups,
        ancestors: HashSet::new(),
    };

    let mut forest: Vec<AccountNode> = roots
        .into_iter()
        .filter_map(|idx| builder.attach(idx, 0))
        .collect();

    // Whatever is left sits on a parent cycle that no root leads into.
    for idx in 0..builder.slots.len() {
        if builder.slots[idx].is_some() {
            warn!(
                "account {} is only reachable through a parent cycle; placing it at the root",
                builder.ids[idx]
            );
            forest.extend(builder.attach(idx, 0));
        }
    }

    forest
}

struct FlatBuilder<'a> {
    slots: Vec<Option<AccountRecord>>,
    ids: &'a [AccountId],
    groups: HashMap<AccountId, Vec<usize>>,
    ancestors: HashSet<AccountId>,
}

impl FlatBuilder<'_> {
    /// Places record `idx` and its descendants. `None` if it was already placed.
    fn attach(&mut self, idx: usize, depth: usize) -> Option<AccountNode> {
        let record = self.slots[idx].take()?;
        let inserted = self.ancestors.insert(record.id.clone());
        let child_indices = self.groups.get(&record.id).cloned().unwrap_or_default();

        let ids = self.ids;
        let mut children = Vec::with_capacity(child_indices.len());
        for child_idx in child_indices {
            let child_id = &ids[child_idx];
            if self.ancestors.contains(child_id) {
                if self.slots[child_idx].is_none() {
                    warn!(
                        "account {} closes a parent cycle under {}; branch truncated",
                        child_id, record.id
                    );
                }
                continue;
            }
            if let Some(child) = self.attach(child_idx, depth + 1) {
                children.push(child);
            }
        }

        if inserted {
            self.ancestors.remove(&record.id);
        }

        Some(AccountNode {
            record,
            depth,
            children,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::AccountType;

    fn account(id: i64, parent: Option<i64>) -> AccountRecord {
        let code = format!("{}", 1000 + id);
        let record = AccountRecord::new(id, code, format!("Account {id}"), AccountType::Asset);
        match parent {
            Some(parent) => record.with_parent(parent),
            None => record,
        }
    }

    fn ids(nodes: &[AccountNode]) -> Vec<AccountId> {
        nodes.iter().map(|node| node.id().clone()).collect()
    }

    fn assert_depths(nodes: &[AccountNode], expected: usize) {
        for node in nodes {
            assert_eq!(node.depth, expected, "depth of {}", node.id());
            assert!(node.record.children.is_empty());
            assert_depths(&node.children, expected + 1);
        }
    }

    #[test]
    fn dangling_parent_becomes_root() {
        let mut cash = account(2, Some(1));
        cash.name = "Cash".into();
        let records = vec![account(1, None), cash, account(3, Some(99))];
        let forest = build_tree(&records);

        assert_eq!(ids(&forest), vec![AccountId::Number(1), AccountId::Number(3)]);
        assert_eq!(forest[0].children.len(), 1);
        assert_eq!(forest[0].children[0].record.name, "Cash");
        assert_eq!(forest[0].children[0].depth, 1);
        assert_eq!(forest[1].depth, 0);
    }

    #[test]
    fn flat_listing_keeps_every_record_once_in_input_order() {
        let records = vec![
            account(5, Some(1)),
            account(1, None),
            account(4, Some(2)),
            account(2, Some(1)),
            account(3, None),
            account(6, Some(1)),
        ];
        let forest = build_tree(&records);

        assert_eq!(forest.iter().map(AccountNode::count).sum::<usize>(), records.len());
        assert_eq!(ids(&forest), vec![AccountId::Number(1), AccountId::Number(3)]);
        assert_eq!(
            ids(&forest[0].children),
            vec![AccountId::Number(5), AccountId::Number(2), AccountId::Number(6)]
        );
        assert_eq!(ids(&forest[0].children[1].children), vec![AccountId::Number(4)]);
        assert_depths(&forest, 0);
    }

    #[test]
    fn pre_nested_listing_is_kept_verbatim() {
        let records = vec![
            account(1, None).with_children(vec![
                account(20, Some(999)).with_children(vec![account(300, None)]),
                account(10, None),
            ]),
            account(2, None),
        ];
        let forest = build_tree(&records);

        assert_eq!(ids(&forest), vec![AccountId::Number(1), AccountId::Number(2)]);
        assert_eq!(
            ids(&forest[0].children),
            vec![AccountId::Number(20), AccountId::Number(10)]
        );
        assert_eq!(forest[0].children[0].children[0].depth, 2);
        assert_depths(&forest, 0);
    }

    #[test]
    fn flat_cycle_is_truncated_without_losing_records() {
        let records = vec![account(1, Some(2)), account(2, Some(1)), account(3, None)];
        let forest = build_tree(&records);

        assert_eq!(forest.iter().map(AccountNode::count).sum::<usize>(), 3);
        assert_eq!(ids(&forest), vec![AccountId::Number(3), AccountId::Number(1)]);
        assert_eq!(ids(&forest[1].children), vec![AccountId::Number(2)]);
        assert!(forest[1].children[0].children.is_empty());
    }

    #[test]
    fn self_parented_record_stays_a_leaf_root() {
        let forest = build_tree(&[account(7, Some(7))]);
        assert_eq!(forest.len(), 1);
        assert!(!forest[0].has_children());
    }

    #[test]
    fn nested_repeat_of_an_ancestor_becomes_a_leaf() {
        let records = vec![account(1, None).with_children(vec![
            account(1, None).with_children(vec![account(2, None)]),
        ])];
        let forest = build_tree(&records);

        assert_eq!(forest[0].count(), 2);
        assert!(!forest[0].children[0].has_children());
    }

    #[test]
    fn empty_input_yields_empty_forest() {
        assert!(build_tree(&[]).is_empty());
    }
}
