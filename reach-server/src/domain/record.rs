//! Ingestion records.
//!
//! These mirror the rows of the node and edge tables and carry raw,
//! unvalidated values. Validation happens when the graph is built.

use serde::Deserialize;

use super::NodeId;

/// A node row: id plus an optional service label.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    #[serde(default)]
    pub label: Option<String>,
}

impl NodeRecord {
    pub fn new(id: u64, label: Option<&str>) -> Self {
        Self {
            id: NodeId(id),
            label: label.map(str::to_string),
        }
    }

    /// An unlabeled node.
    pub fn plain(id: u64) -> Self {
        Self::new(id, None)
    }
}

/// An undirected edge row. The same pair may appear more than once.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EdgeRecord {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: f64,
}

impl EdgeRecord {
    pub fn new(source: u64, target: u64, weight: f64) -> Self {
        Self {
            source: NodeId(source),
            target: NodeId(target),
            weight,
        }
    }
}
