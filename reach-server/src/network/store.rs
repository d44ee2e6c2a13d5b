//! Persistent graph storage with an ephemeral node bracket.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, trace};

use super::{GraphError, Network};
use crate::domain::{Cost, EdgeRecord, NodeId, NodeRecord};

/// Adjacency entry: neighbour and effective weight.
type Link = (NodeId, Cost);

/// An undirected weighted graph built once from ingestion.
///
/// Parallel edges are collapsed to their minimum weight when the store is
/// built. The persistent part is immutable afterwards; the only mutation is
/// the ephemeral bracket (`add_ephemeral_node`, `add_weighted_edges`,
/// `remove_node`), whose entries are kept apart from the persistent adjacency
/// so removal restores the exact pre-insertion state.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    /// Persistent nodes in ascending id order.
    ids: Vec<NodeId>,

    /// Collapsed persistent adjacency, neighbours sorted by id.
    adjacency: HashMap<NodeId, Vec<Link>>,

    /// Number of distinct persistent node pairs joined by an edge.
    edge_count: usize,

    /// Number of raw edges supplied at build time, parallel edges included.
    raw_edge_count: usize,

    /// Ephemeral node -> its links into the persistent graph.
    ephemeral: HashMap<NodeId, Vec<Link>>,

    /// Persistent node -> links back to ephemeral nodes.
    back_links: HashMap<NodeId, Vec<Link>>,
}

impl GraphStore {
    /// Build the store from node and edge records.
    ///
    /// Edge endpoints missing from `nodes` are added as unlabeled nodes.
    /// Any edge with an invalid weight rejects the whole build.
    pub fn build(nodes: &[NodeRecord], edges: &[EdgeRecord]) -> Result<Self, GraphError> {
        let mut collapsed: HashMap<NodeId, HashMap<NodeId, Cost>> = HashMap::new();
        for node in nodes {
            collapsed.entry(node.id).or_default();
        }

        let declared = collapsed.len();
        for edge in edges {
            let weight = Cost::new(edge.weight).map_err(|_| GraphError::InvalidWeight {
                from: edge.source,
                to: edge.target,
                weight: edge.weight,
            })?;

            for (a, b) in [(edge.source, edge.target), (edge.target, edge.source)] {
                collapsed
                    .entry(a)
                    .or_default()
                    .entry(b)
                    .and_modify(|w| *w = (*w).min(weight))
                    .or_insert(weight);
            }
        }

        let implicit = collapsed.len() - declared;
        if implicit > 0 {
            debug!(implicit, "edge endpoints added as unlabeled nodes");
        }

        let mut ids: Vec<NodeId> = collapsed.keys().copied().collect();
        ids.sort_unstable();

        let mut edge_count = 0;
        let adjacency = collapsed
            .into_iter()
            .map(|(node, neighbours)| {
                edge_count += neighbours.keys().filter(|&&n| node <= n).count();
                let mut links: Vec<Link> = neighbours.into_iter().collect();
                links.sort_unstable_by_key(|(n, _)| *n);
                (node, links)
            })
            .collect();

        debug!(
            nodes = ids.len(),
            edges = edge_count,
            raw_edges = edges.len(),
            "graph store built"
        );

        Ok(Self {
            ids,
            adjacency,
            edge_count,
            raw_edge_count: edges.len(),
            ephemeral: HashMap::new(),
            back_links: HashMap::new(),
        })
    }

    /// Persistent node ids in ascending order.
    pub fn node_ids(&self) -> &[NodeId] {
        &self.ids
    }

    /// Number of persistent nodes.
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Number of distinct node pairs joined by at least one edge.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of edges supplied at build time, counting parallel edges.
    pub fn raw_edge_count(&self) -> usize {
        self.raw_edge_count
    }

    /// Largest persistent node id, if any.
    pub fn max_id(&self) -> Option<NodeId> {
        self.ids.last().copied()
    }

    /// Returns true if `node` is part of the persistent graph.
    pub fn is_persistent(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Effective weight between two nodes, if they are adjacent.
    pub fn edge_weight(&self, a: NodeId, b: NodeId) -> Option<Cost> {
        self.neighbors(a).find(|(n, _)| *n == b).map(|(_, w)| w)
    }

    /// Returns true if no ephemeral node or link is present.
    pub fn is_pristine(&self) -> bool {
        self.ephemeral.is_empty() && self.back_links.is_empty()
    }

    /// Introduce an ephemeral node with no edges.
    pub fn add_ephemeral_node(&mut self, id: NodeId) -> Result<(), GraphError> {
        if self.contains(id) {
            return Err(GraphError::NodeExists(id));
        }
        self.ephemeral.insert(id, Vec::new());
        trace!(node = %id, "ephemeral node added");
        Ok(())
    }

    /// Attach `weight`-weighted edges from ephemeral node `id` to every target.
    ///
    /// Targets must be persistent nodes. Nothing is attached if any target is
    /// invalid. Repeated targets keep the smaller weight.
    pub fn add_weighted_edges<I>(
        &mut self,
        id: NodeId,
        targets: I,
        weight: Cost,
    ) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let Some(links) = self.ephemeral.get_mut(&id) else {
            return Err(if self.adjacency.contains_key(&id) {
                GraphError::NotEphemeral(id)
            } else {
                GraphError::UnknownNode(id)
            });
        };

        let targets: Vec<NodeId> = targets.into_iter().collect();
        if let Some(&bad) = targets.iter().find(|&&t| !self.adjacency.contains_key(&t)) {
            return Err(GraphError::UnknownNode(bad));
        }

        for &target in &targets {
            upsert(links, target, weight);
            upsert(self.back_links.entry(target).or_default(), id, weight);
        }

        trace!(node = %id, targets = targets.len(), %weight, "ephemeral edges added");
        Ok(())
    }

    /// Remove an ephemeral node and every edge incident to it.
    ///
    /// Returns `Ok(false)` if the node was not present. Persistent nodes
    /// cannot be removed.
    pub fn remove_node(&mut self, id: NodeId) -> Result<bool, GraphError> {
        if self.adjacency.contains_key(&id) {
            return Err(GraphError::NotEphemeral(id));
        }
        let Some(links) = self.ephemeral.remove(&id) else {
            return Ok(false);
        };

        for (target, _) in links {
            if let Entry::Occupied(mut entry) = self.back_links.entry(target) {
                entry.get_mut().retain(|(n, _)| *n != id);
                if entry.get().is_empty() {
                    entry.remove();
                }
            }
        }

        if self
            .back_links
            .values()
            .any(|links| links.iter().any(|(n, _)| *n == id))
        {
            return Err(GraphError::Integrity(id));
        }

        trace!(node = %id, "ephemeral node removed");
        Ok(true)
    }
}

impl Network for GraphStore {
    fn contains(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node) || self.ephemeral.contains_key(&node)
    }

    fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, Cost)> + '_ {
        let persistent = self.adjacency.get(&node).map_or(&[][..], Vec::as_slice);
        let back = self.back_links.get(&node).map_or(&[][..], Vec::as_slice);
        let own = self.ephemeral.get(&node).map_or(&[][..], Vec::as_slice);
        persistent.iter().chain(back).chain(own).copied()
    }
}

/// Insert or lower the weight of the link to `to`.
fn upsert(links: &mut Vec<Link>, to: NodeId, weight: Cost) {
    match links.iter_mut().find(|(n, _)| *n == to) {
        Some((_, w)) => *w = (*w).min(weight),
        None => links.push((to, weight)),
    }
}
