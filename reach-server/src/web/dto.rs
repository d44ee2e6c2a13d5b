//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::NodeId;
use crate::reach::{CategoryIndex, CoverageReport};

/// Request to compute coverage.
#[derive(Debug, Deserialize)]
pub struct CoverageRequest {
    /// Travel cost threshold, same unit as edge weights
    pub threshold: f64,

    /// Categories to require (defaults to every category). An empty list is
    /// rejected.
    pub categories: Option<Vec<String>>,
}

/// Covered nodes for a threshold.
#[derive(Debug, Serialize)]
pub struct CoverageResponse {
    pub threshold: f64,

    /// Categories that were required, in column order
    pub categories: Vec<String>,

    pub covered_count: usize,

    /// Covered node ids, ascending
    pub covered: Vec<NodeId>,
}

impl CoverageResponse {
    pub fn from_report(report: &CoverageReport) -> Self {
        Self {
            threshold: report.threshold.value(),
            categories: report
                .matrix
                .categories()
                .iter()
                .map(|c| c.to_string())
                .collect(),
            covered_count: report.covered.len(),
            covered: report.covered.iter().copied().collect(),
        }
    }
}

/// Query for a single node's reachability.
#[derive(Debug, Deserialize)]
pub struct NodeReachQuery {
    pub threshold: f64,
}

/// Reachability of one category from one node.
#[derive(Debug, Serialize)]
pub struct CategoryReach {
    pub category: String,
    pub reachable: bool,
}

/// Per-category reachability for one node.
#[derive(Debug, Serialize)]
pub struct NodeReachResponse {
    pub node: NodeId,
    pub threshold: f64,
    pub reach: Vec<CategoryReach>,

    /// True if every category is reachable
    pub covered: bool,
}

impl NodeReachResponse {
    /// Returns `None` if the node has no row in the report.
    pub fn from_report(report: &CoverageReport, node: NodeId) -> Option<Self> {
        let row = report.matrix.row(node)?;
        let reach = report
            .matrix
            .categories()
            .iter()
            .zip(row)
            .map(|(category, &reachable)| CategoryReach {
                category: category.to_string(),
                reachable,
            })
            .collect();

        Some(Self {
            node,
            threshold: report.threshold.value(),
            reach,
            covered: report.covered.contains(&node),
        })
    }
}

/// A category and its member count.
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub members: usize,
}

/// Summary of the loaded dataset.
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub nodes: usize,
    pub categories: Vec<CategorySummary>,
}

impl CategoriesResponse {
    pub fn new(nodes: usize, index: &CategoryIndex) -> Self {
        Self {
            nodes,
            categories: index
                .iter()
                .map(|(category, members)| CategorySummary {
                    name: category.to_string(),
                    members: members.len(),
                })
                .collect(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Cost};
    use crate::reach::ReachabilityMatrix;

    fn report() -> CoverageReport {
        let cats = vec![
            Category::parse("school").unwrap(),
            Category::parse("shop").unwrap(),
        ];
        let mut matrix = ReachabilityMatrix::new(&[NodeId(1), NodeId(2)], cats);
        matrix.set(NodeId(1), 0);
        matrix.set(NodeId(1), 1);
        matrix.set(NodeId(2), 1);
        CoverageReport::from_matrix(Cost::new(15.0).unwrap(), matrix)
    }

    #[test]
    fn coverage_response_json() {
        let json = serde_json::to_value(CoverageResponse::from_report(&report())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "threshold": 15.0,
                "categories": ["school", "shop"],
                "covered_count": 1,
                "covered": [1],
            })
        );
    }

    #[test]
    fn node_reach_response() {
        let resp = NodeReachResponse::from_report(&report(), NodeId(2)).unwrap();
        assert!(!resp.covered);
        assert_eq!(resp.reach.len(), 2);
        assert!(!resp.reach[0].reachable);
        assert!(resp.reach[1].reachable);
        assert_eq!(resp.reach[1].category, "shop");
    }

    #[test]
    fn node_reach_unknown_node() {
        assert!(NodeReachResponse::from_report(&report(), NodeId(7)).is_none());
    }

    #[test]
    fn coverage_request_categories_optional() {
        let req: CoverageRequest = serde_json::from_str(r#"{"threshold": 10}"#).unwrap();
        assert_eq!(req.threshold, 10.0);
        assert!(req.categories.is_none());
    }
}
