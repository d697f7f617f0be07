use std::collections::HashSet;

use crate::domain::account::AccountId;
use crate::tree::model::AccountNode;

/// Which accounts currently show their children.
///
/// Membership is the whole state; anything absent is collapsed. The set
/// never touches the tree it is consulted for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionSet {
    expanded: HashSet<AccountId>,
}

impl ExpansionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expands `id` if collapsed, collapses it otherwise.
    pub fn toggle(&mut self, id: &AccountId) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.clone());
        }
    }

    pub fn is_expanded(&self, id: &AccountId) -> bool {
        self.expanded.contains(id)
    }

    pub fn expand(&mut self, id: &AccountId) {
        self.expanded.insert(id.clone());
    }

    pub fn collapse(&mut self, id: &AccountId) {
        self.expanded.remove(id);
    }

    /// Expands every node of `forest` that has children.
    pub fn expand_all(&mut self, forest: &[AccountNode]) {
        for node in forest {
            if node.has_children() {
                self.expanded.insert(node.id().clone());
                self.expand_all(&node.children);
            }
        }
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}
