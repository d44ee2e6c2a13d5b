//! Virtual source overlay on a read-only graph.

use std::collections::BTreeSet;

use super::{GraphError, GraphStore, Network};
use crate::domain::{Cost, NodeId};

/// A [`GraphStore`] seen with one extra virtual source attached.
///
/// The source has a zero-weight link to every member, and each member links
/// back to it. The base graph is never touched, so overlays for different
/// categories can be searched concurrently.
#[derive(Debug, Clone, Copy)]
pub struct SourceOverlay<'g> {
    base: &'g GraphStore,
    source: NodeId,
    members: &'g BTreeSet<NodeId>,
}

impl<'g> SourceOverlay<'g> {
    /// Layer `source` over `base`, linked to `members`.
    ///
    /// Fails if `source` already exists in the base graph or a member does not.
    pub fn new(
        base: &'g GraphStore,
        source: NodeId,
        members: &'g BTreeSet<NodeId>,
    ) -> Result<Self, GraphError> {
        if base.contains(source) {
            return Err(GraphError::NodeExists(source));
        }
        if let Some(&missing) = members.iter().find(|&&m| !base.is_persistent(m)) {
            return Err(GraphError::UnknownNode(missing));
        }
        Ok(Self {
            base,
            source,
            members,
        })
    }

    /// The virtual source id.
    pub fn source(&self) -> NodeId {
        self.source
    }
}

impl Network for SourceOverlay<'_> {
    fn contains(&self, node: NodeId) -> bool {
        node == self.source || self.base.contains(node)
    }

    fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, Cost)> + '_ {
        let is_source = node == self.source;
        let own = is_source
            .then_some(self.members)
            .into_iter()
            .flatten()
            .map(|&m| (m, Cost::ZERO));
        let back = (!is_source && self.members.contains(&node)).then_some((self.source, Cost::ZERO));
        self.base.neighbors(node).chain(back).chain(own)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EdgeRecord, NodeRecord};

    fn line() -> GraphStore {
        let nodes: Vec<_> = (1..=3).map(NodeRecord::plain).collect();
        let edges = vec![EdgeRecord::new(1, 2, 1.0), EdgeRecord::new(2, 3, 1.0)];
        GraphStore::build(&nodes, &edges).unwrap()
    }

    #[test]
    fn source_links_to_members() {
        let g = line();
        let members: BTreeSet<_> = [NodeId(1), NodeId(3)].into();
        let overlay = SourceOverlay::new(&g, NodeId(4), &members).unwrap();

        let out: Vec<_> = overlay.neighbors(NodeId(4)).collect();
        assert_eq!(out, vec![(NodeId(1), Cost::ZERO), (NodeId(3), Cost::ZERO)]);
        assert!(overlay.contains(NodeId(4)));
        assert!(!g.contains(NodeId(4)));
    }

    #[test]
    fn members_link_back() {
        let g = line();
        let members: BTreeSet<_> = [NodeId(1)].into();
        let overlay = SourceOverlay::new(&g, NodeId(4), &members).unwrap();

        assert!(overlay.neighbors(NodeId(1)).any(|l| l == (NodeId(4), Cost::ZERO)));
        assert!(!overlay.neighbors(NodeId(2)).any(|(n, _)| n == NodeId(4)));
    }

    #[test]
    fn collision_rejected() {
        let g = line();
        let members = BTreeSet::new();
        assert_eq!(
            SourceOverlay::new(&g, NodeId(2), &members).unwrap_err(),
            GraphError::NodeExists(NodeId(2))
        );
    }

    #[test]
    fn unknown_member_rejected() {
        let g = line();
        let members: BTreeSet<_> = [NodeId(9)].into();
        assert_eq!(
            SourceOverlay::new(&g, NodeId(4), &members).unwrap_err(),
            GraphError::UnknownNode(NodeId(9))
        );
    }
}
