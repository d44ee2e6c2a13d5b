//! Threshold-bounded multi-source search.
//!
//! Each category is searched from one virtual source linked at zero cost to
//! every member, which turns "distance to the nearest member" into a single
//! source problem. The search stops as soon as the frontier minimum exceeds
//! the threshold.

use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap, HashMap, HashSet};

use rayon::prelude::*;
use tracing::{debug, warn};

use super::config::{EngineConfig, SearchMode};
use super::coverage::CoverageReport;
use super::{CategoryIndex, ReachabilityMatrix};
use crate::domain::{Category, Cost, NodeId};
use crate::network::{GraphError, GraphStore, Network, SourceOverlay};

/// Error from reachability evaluation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReachError {
    /// Threshold is negative, NaN or infinite
    #[error("invalid threshold {0}: must be a finite non-negative number")]
    InvalidThreshold(f64),

    /// No id above the largest real node is left for a virtual source
    #[error("no free id left for a virtual source")]
    SourceIdOverflow,

    /// Virtual source id is already taken
    #[error("virtual source {0} collides with an existing node")]
    SourceCollision(NodeId),

    /// Graph rejected an operation
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl ReachError {
    /// True for errors caused by the caller's input rather than engine state.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, ReachError::Graph(GraphError::Integrity(_)))
    }
}

/// Frontier entry, ordered so `BinaryHeap` pops the smallest cost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frontier {
    cost: Cost,
    node: NodeId,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// What a single bounded search found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Nodes within the threshold. Never contains the source.
    pub reached: HashSet<NodeId>,

    /// Frontier entries popped within the threshold.
    pub pops: usize,

    /// Popped entries whose cost was worse than the node's best.
    pub stale: usize,
}

/// Run a search from `source`, collecting every node whose shortest
/// distance is at most `threshold`.
///
/// Requires non-negative weights: the first popped entry over the threshold
/// ends the search because every remaining entry costs at least as much.
pub fn bounded_search<N: Network>(
    network: &N,
    source: NodeId,
    threshold: Cost,
    mode: SearchMode,
) -> SearchOutcome {
    let mut outcome = SearchOutcome::default();
    let mut best: HashMap<NodeId, Cost> = HashMap::new();
    let mut settled: HashSet<NodeId> = HashSet::new();
    let mut frontier = BinaryHeap::new();

    best.insert(source, Cost::ZERO);
    frontier.push(Frontier {
        cost: Cost::ZERO,
        node: source,
    });

    while let Some(Frontier { cost, node }) = frontier.pop() {
        if cost > threshold {
            break;
        }
        outcome.pops += 1;

        if best.get(&node).is_some_and(|&b| cost > b) {
            outcome.stale += 1;
        }
        if mode == SearchMode::Settled && !settled.insert(node) {
            continue;
        }

        if node != source {
            outcome.reached.insert(node);
        }

        for (next, weight) in network.neighbors(node) {
            let candidate = cost + weight;
            if best.get(&next).is_none_or(|&b| candidate < b) {
                best.insert(next, candidate);
                frontier.push(Frontier {
                    cost: candidate,
                    node: next,
                });
            }
        }
    }

    outcome
}

/// Evaluates per-category reachability over a [`GraphStore`].
#[derive(Debug, Clone, Default)]
pub struct ReachabilityEngine {
    config: EngineConfig,
}

impl ReachabilityEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Compute the reachability matrix using a read-only overlay per category.
    pub fn run(
        &self,
        graph: &GraphStore,
        index: &CategoryIndex,
        threshold: f64,
    ) -> Result<ReachabilityMatrix, ReachError> {
        let threshold = validate_threshold(threshold)?;
        check_members(graph, index)?;

        let overlays = index
            .iter()
            .enumerate()
            .map(|(column, (_, members))| {
                let source = virtual_source(graph, column)?;
                Ok(SourceOverlay::new(graph, source, members)?)
            })
            .collect::<Result<Vec<_>, ReachError>>()?;

        let mode = self.config.mode;
        let search = |overlay: &SourceOverlay<'_>| {
            bounded_search(overlay, overlay.source(), threshold, mode)
        };
        let outcomes: Vec<SearchOutcome> = if self.config.parallel {
            overlays.par_iter().map(search).collect()
        } else {
            overlays.iter().map(search).collect()
        };

        let categories = index.categories().cloned().collect();
        let mut matrix = ReachabilityMatrix::new(graph.node_ids(), categories);
        for (column, ((category, members), outcome)) in index.iter().zip(outcomes).enumerate()
        {
            record(&mut matrix, column, category, members, outcome);
        }
        Ok(matrix)
    }

    /// Compute the reachability matrix by inserting each virtual source into
    /// `graph` and removing it again after its search.
    ///
    /// Unknown members are reported by the attach step, after the source is
    /// removed again. The graph is checked to be back in its pristine state
    /// after every category; a leftover entry is an integrity error.
    pub fn run_in_place(
        &self,
        graph: &mut GraphStore,
        index: &CategoryIndex,
        threshold: f64,
    ) -> Result<ReachabilityMatrix, ReachError> {
        let threshold = validate_threshold(threshold)?;

        let sources = (0..index.len())
            .map(|column| virtual_source(graph, column))
            .collect::<Result<Vec<_>, _>>()?;

        let categories = index.categories().cloned().collect();
        let mut matrix = ReachabilityMatrix::new(graph.node_ids(), categories);
        for (column, ((category, members), source)) in index.iter().zip(sources).enumerate() {
            graph.add_ephemeral_node(source)?;
            let outcome = graph
                .add_weighted_edges(source, members.iter().copied(), Cost::ZERO)
                .map(|()| bounded_search(&*graph, source, threshold, self.config.mode));

            // Unwind before surfacing any attach error.
            graph.remove_node(source)?;
            if !graph.is_pristine() {
                return Err(GraphError::Integrity(source).into());
            }

            record(&mut matrix, column, category, members, outcome?);
        }
        Ok(matrix)
    }

    /// [`run`](Self::run) followed by aggregation.
    pub fn evaluate(
        &self,
        graph: &GraphStore,
        index: &CategoryIndex,
        threshold: f64,
    ) -> Result<CoverageReport, ReachError> {
        let matrix = self.run(graph, index, threshold)?;
        Ok(CoverageReport::from_matrix(validate_threshold(threshold)?, matrix))
    }

    /// [`run_in_place`](Self::run_in_place) followed by aggregation.
    pub fn evaluate_in_place(
        &self,
        graph: &mut GraphStore,
        index: &CategoryIndex,
        threshold: f64,
    ) -> Result<CoverageReport, ReachError> {
        let matrix = self.run_in_place(graph, index, threshold)?;
        Ok(CoverageReport::from_matrix(validate_threshold(threshold)?, matrix))
    }
}

fn validate_threshold(threshold: f64) -> Result<Cost, ReachError> {
    Cost::new(threshold).map_err(|_| ReachError::InvalidThreshold(threshold))
}

/// Every category member must be a persistent node.
fn check_members(graph: &GraphStore, index: &CategoryIndex) -> Result<(), ReachError> {
    match index
        .iter()
        .flat_map(|(_, members)| members.iter())
        .find(|&&m| !graph.is_persistent(m))
    {
        Some(&missing) => Err(GraphError::UnknownNode(missing).into()),
        None => Ok(()),
    }
}

/// Virtual source id for `column`: one past the largest real id, plus the column.
fn virtual_source(graph: &GraphStore, column: usize) -> Result<NodeId, ReachError> {
    let base = match graph.max_id() {
        Some(max) => max.checked_offset(1).ok_or(ReachError::SourceIdOverflow)?,
        None => NodeId(0),
    };
    let id = base
        .checked_offset(column as u64)
        .ok_or(ReachError::SourceIdOverflow)?;
    if graph.contains(id) {
        return Err(ReachError::SourceCollision(id));
    }
    Ok(id)
}

fn record(
    matrix: &mut ReachabilityMatrix,
    column: usize,
    category: &Category,
    members: &BTreeSet<NodeId>,
    outcome: SearchOutcome,
) {
    if members.is_empty() {
        warn!(%category, "category has no members, nothing is reachable");
    }
    debug!(
        %category,
        members = members.len(),
        reached = outcome.reached.len(),
        pops = outcome.pops,
        stale = outcome.stale,
        "category search complete"
    );
    matrix.mark_column(column, outcome.reached);
}
