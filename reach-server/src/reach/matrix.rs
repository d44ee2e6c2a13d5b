//! Per-node, per-category reachability bits.

use std::collections::HashMap;

use crate::domain::{Category, NodeId};

/// Reachability bits for every real node, one column per category.
///
/// All bits start false and are only ever set, never cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachabilityMatrix {
    categories: Vec<Category>,
    rows: HashMap<NodeId, Vec<bool>>,
}

impl ReachabilityMatrix {
    /// Create an all-false matrix for `nodes` x `categories`.
    pub fn new(nodes: &[NodeId], categories: Vec<Category>) -> Self {
        let width = categories.len();
        let rows = nodes.iter().map(|&n| (n, vec![false; width])).collect();
        Self { categories, rows }
    }

    /// Number of categories.
    pub fn width(&self) -> usize {
        self.categories.len()
    }

    /// Number of rows (real nodes).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Column index of a category.
    pub fn column_of(&self, category: &Category) -> Option<usize> {
        self.categories.iter().position(|c| c == category)
    }

    /// Set the bit for `node` in `column`.
    ///
    /// Returns false if `node` has no row (virtual nodes never do).
    pub fn set(&mut self, node: NodeId, column: usize) -> bool {
        match self.rows.get_mut(&node) {
            Some(row) if column < row.len() => {
                row[column] = true;
                true
            }
            _ => false,
        }
    }

    /// Set the bit in `column` for every node in `reached`.
    pub fn mark_column<I>(&mut self, column: usize, reached: I)
    where
        I: IntoIterator<Item = NodeId>,
    {
        for node in reached {
            self.set(node, column);
        }
    }

    pub fn is_reachable(&self, node: NodeId, column: usize) -> bool {
        self.rows
            .get(&node)
            .and_then(|row| row.get(column))
            .copied()
            .unwrap_or(false)
    }

    pub fn row(&self, node: NodeId) -> Option<&[bool]> {
        self.rows.get(&node).map(Vec::as_slice)
    }

    /// All rows, in no particular order.
    pub fn rows(&self) -> impl Iterator<Item = (NodeId, &[bool])> {
        self.rows.iter().map(|(&n, row)| (n, row.as_slice()))
    }

    /// Number of nodes whose bit is set in `column`.
    pub fn reached_count(&self, column: usize) -> usize {
        self.rows
            .values()
            .filter(|row| row.get(column).copied().unwrap_or(false))
            .count()
    }
}
