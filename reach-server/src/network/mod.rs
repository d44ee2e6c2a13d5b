//! Weighted transport network.
//!
//! The persistent graph is an undirected multigraph collapsed at build time
//! into a simple graph whose edge weight is the minimum over all parallel
//! edges. Searches run against the [`Network`] trait so the same code can
//! walk the store itself (with an ephemeral node bracketed in and out) or a
//! read-only [`SourceOverlay`] that layers one virtual source on top.

mod error;
mod overlay;
mod store;

pub use error::GraphError;
pub use overlay::SourceOverlay;
pub use store::GraphStore;

use crate::domain::{Cost, NodeId};

/// Read access to a weighted graph during traversal.
pub trait Network {
    /// Returns true if the node is present.
    fn contains(&self, node: NodeId) -> bool;

    /// Distinct neighbours of `node` with the effective (minimum) weight.
    ///
    /// Unknown nodes have no neighbours.
    fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, Cost)> + '_;
}
