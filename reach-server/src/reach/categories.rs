//! Grouping of nodes by service category.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{Category, NodeId, NodeRecord};

/// Map from category to the ids of the nodes offering it.
///
/// Categories iterate in sorted order; that order fixes the column layout
/// of every [`ReachabilityMatrix`](super::ReachabilityMatrix).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    groups: BTreeMap<Category, BTreeSet<NodeId>>,
}

impl CategoryIndex {
    /// Group node records by label. Unlabeled nodes join no group.
    pub fn build(nodes: &[NodeRecord]) -> Self {
        let mut groups: BTreeMap<Category, BTreeSet<NodeId>> = BTreeMap::new();
        for node in nodes {
            if let Some(category) = Category::from_label(node.label.as_deref()) {
                groups.entry(category).or_default().insert(node.id);
            }
        }
        Self { groups }
    }

    /// Build directly from groups.
    pub fn from_groups<I, M>(groups: I) -> Self
    where
        I: IntoIterator<Item = (Category, M)>,
        M: IntoIterator<Item = NodeId>,
    {
        Self {
            groups: groups
                .into_iter()
                .map(|(c, members)| (c, members.into_iter().collect()))
                .collect(),
        }
    }

    /// Restrict the index to the requested categories.
    ///
    /// A requested category with no members in the data is kept with an
    /// empty member set, which makes the resulting coverage empty.
    pub fn select(&self, wanted: &[Category]) -> Self {
        let groups = wanted
            .iter()
            .map(|category| {
                let members = self.groups.get(category).cloned().unwrap_or_default();
                (category.clone(), members)
            })
            .collect();
        Self { groups }
    }

    /// Number of categories, which is the width of a matrix row.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.groups.keys()
    }

    pub fn members(&self, category: &Category) -> Option<&BTreeSet<NodeId>> {
        self.groups.get(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, &BTreeSet<NodeId>)> {
        self.groups.iter()
    }
}
