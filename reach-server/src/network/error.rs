//! Graph structure error types.

use crate::domain::NodeId;

/// Errors raised while building or mutating a [`GraphStore`](super::GraphStore).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Edge weight is negative, NaN or infinite
    #[error("invalid weight {weight} on edge {from}-{to}")]
    InvalidWeight {
        from: NodeId,
        to: NodeId,
        weight: f64,
    },

    /// Node id is already present in the graph
    #[error("node {0} already exists")]
    NodeExists(NodeId),

    /// Node id is not present in the graph
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    /// Persistent nodes and their edges cannot be mutated
    #[error("node {0} is persistent, only ephemeral nodes can be mutated")]
    NotEphemeral(NodeId),

    /// Removing an ephemeral node left stale adjacency entries behind
    #[error("integrity violation: stale adjacency entries for removed node {0}")]
    Integrity(NodeId),
}
