//! Node identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a node in the transport network.
///
/// Real nodes come from ingestion; virtual sources are allocated above the
/// largest real id for the duration of a single category search.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Returns the id `offset` places above this one, or `None` on overflow.
    pub fn checked_offset(self, offset: u64) -> Option<NodeId> {
        self.0.checked_add(offset).map(NodeId)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
