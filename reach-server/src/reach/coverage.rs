//! Reduction of the reachability matrix to the covered node set.

use std::collections::BTreeSet;

use super::ReachabilityMatrix;
use crate::domain::{Cost, NodeId};

/// Nodes whose row has exactly `category_count` bits set.
///
/// With no categories every node qualifies vacuously.
pub fn aggregate(matrix: &ReachabilityMatrix, category_count: usize) -> BTreeSet<NodeId> {
    matrix
        .rows()
        .filter(|(_, row)| row.iter().filter(|&&bit| bit).count() == category_count)
        .map(|(node, _)| node)
        .collect()
}

/// Result of one full accessibility evaluation.
#[derive(Debug, Clone)]
pub struct CoverageReport {
    /// Threshold the matrix was computed for.
    pub threshold: Cost,

    /// Per-node, per-category reachability.
    pub matrix: ReachabilityMatrix,

    /// Nodes reachable within the threshold for every category.
    pub covered: BTreeSet<NodeId>,
}

impl CoverageReport {
    pub fn from_matrix(threshold: Cost, matrix: ReachabilityMatrix) -> Self {
        let covered = aggregate(&matrix, matrix.width());
        Self {
            threshold,
            matrix,
            covered,
        }
    }
}
