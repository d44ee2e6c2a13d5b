//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{debug, error, warn};

use crate::cache::CoverageCache;
use crate::domain::{Category, Cost, DomainError, NodeId};
use crate::reach::{CoverageReport, ReachError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/categories", get(list_categories))
        .route("/coverage", post(coverage))
        .route("/nodes/:id/reach", get(node_reach))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Categories in the loaded dataset with member counts.
async fn list_categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    Json(CategoriesResponse::new(
        state.data.graph.node_count(),
        &state.data.index,
    ))
}

/// Covered nodes for a threshold and optional category selection.
async fn coverage(
    State(state): State<AppState>,
    req: Result<Json<CoverageRequest>, JsonRejection>,
) -> Result<Json<CoverageResponse>, AppError> {
    let Json(req) = req?;
    let report = coverage_for(&state, req.threshold, req.categories).await?;
    Ok(Json(CoverageResponse::from_report(&report)))
}

/// Per-category reachability for one node.
async fn node_reach(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    query: Result<Query<NodeReachQuery>, QueryRejection>,
) -> Result<Json<NodeReachResponse>, AppError> {
    let Path(id) = id?;
    let Query(query) = query?;
    let node = NodeId(id);
    let report = coverage_for(&state, query.threshold, None).await?;
    NodeReachResponse::from_report(&report, node)
        .map(Json)
        .ok_or_else(|| AppError::NotFound {
            message: format!("node {node} not found"),
        })
}

/// Look up or compute a coverage report.
///
/// An explicit selection must name at least one category. Evaluation is
/// CPU-bound and runs on the blocking pool.
async fn coverage_for(
    state: &AppState,
    threshold: f64,
    categories: Option<Vec<String>>,
) -> Result<Arc<CoverageReport>, AppError> {
    let cost = Cost::new(threshold)?;
    if categories.as_ref().is_some_and(Vec::is_empty) {
        return Err(AppError::BadRequest {
            message: "category selection is empty".to_string(),
        });
    }
    let selected = categories
        .map(|names| {
            names
                .iter()
                .map(|n| Category::parse(n))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    let key = CoverageCache::key(cost, selected.as_deref());
    if let Some(hit) = state.cache.get(&key).await {
        debug!(threshold, "coverage cache hit");
        return Ok(hit);
    }

    let data = state.data.clone();
    let engine = state.engine.clone();
    let report = tokio::task::spawn_blocking(move || match &selected {
        Some(wanted) => engine.evaluate(&data.graph, &data.index.select(wanted), threshold),
        None => engine.evaluate(&data.graph, &data.index, threshold),
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("evaluation task failed: {e}"),
    })??;

    let report = Arc::new(report);
    state.cache.insert(key, report.clone()).await;
    debug!(threshold, cached = state.cache.entry_count(), "coverage computed");
    Ok(report)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

macro_rules! bad_request_from {
    ($($rejection:ty),*) => {
        $(impl From<$rejection> for AppError {
            fn from(e: $rejection) -> Self {
                AppError::BadRequest {
                    message: e.body_text(),
                }
            }
        })*
    };
}

bad_request_from!(JsonRejection, PathRejection, QueryRejection);

impl From<ReachError> for AppError {
    fn from(e: ReachError) -> Self {
        if e.is_invalid_input() {
            AppError::BadRequest {
                message: e.to_string(),
            }
        } else {
            AppError::Internal {
                message: e.to_string(),
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use tower::ServiceExt;

    use crate::cache::CacheConfig;
    use crate::domain::{EdgeRecord, NodeRecord};
    use crate::ingest::Dataset;
    use crate::network::GraphError;
    use crate::reach::EngineConfig;

    fn state() -> AppState {
        let nodes = vec![
            NodeRecord::new(1, Some("shop")),
            NodeRecord::new(2, None),
            NodeRecord::new(3, Some("school")),
        ];
        let edges = vec![
            EdgeRecord::new(1, 2, 5.0),
            EdgeRecord::new(2, 3, 5.0),
            EdgeRecord::new(1, 3, 20.0),
            EdgeRecord::new(1, 3, 8.0),
        ];
        let data = Dataset::from_records(&nodes, &edges).unwrap();
        AppState::new(data, EngineConfig::default(), &CacheConfig::default())
    }

    #[tokio::test]
    async fn coverage_is_cached() {
        let state = state();

        let first = coverage_for(&state, 10.0, None).await.unwrap();
        let second = coverage_for(&state, 10.0, None).await.unwrap();

        assert_eq!(first.covered.len(), 3);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn category_selection() {
        let state = state();

        let shop_only = coverage_for(&state, 5.0, Some(vec!["shop".into()]))
            .await
            .unwrap();
        assert_eq!(shop_only.covered.len(), 2);

        let with_missing = coverage_for(&state, 5.0, Some(vec!["shop".into(), "clinic".into()]))
            .await
            .unwrap();
        assert!(with_missing.covered.is_empty());
    }

    #[tokio::test]
    async fn negative_threshold_is_bad_request() {
        let state = state();
        let err = coverage_for(&state, -1.0, None).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn blank_category_is_bad_request() {
        let state = state();
        let err = coverage_for(&state, 1.0, Some(vec![" ".into()]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn empty_selection_is_bad_request() {
        let state = state();
        let err = coverage_for(&state, 5.0, Some(Vec::new())).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
        assert_eq!(state.cache.entry_count(), 0);
    }

    #[tokio::test]
    async fn node_reach_found_and_missing() {
        let Json(resp) = node_reach(
            State(state()),
            Ok(Path(2)),
            Ok(Query(NodeReachQuery { threshold: 5.0 })),
        )
        .await
        .unwrap();
        assert!(resp.covered);
        assert!(resp.reach.iter().all(|r| r.reachable));

        let err = node_reach(
            State(state()),
            Ok(Path(99)),
            Ok(Query(NodeReachQuery { threshold: 5.0 })),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn categories_summary() {
        let Json(resp) = list_categories(State(state())).await;
        assert_eq!(resp.nodes, 3);
        assert_eq!(resp.categories.len(), 2);
        assert_eq!(resp.categories[0].name, "school");
        assert_eq!(resp.categories[0].members, 1);
    }

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = create_router(state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_coverage(body: &str) -> Request<Body> {
        Request::post("/coverage")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn router_serves_coverage() {
        let (status, body) = send(post_coverage(r#"{"threshold": 5}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["covered"], serde_json::json!([2]));
    }

    #[tokio::test]
    async fn router_rejections_are_json() {
        let requests = [
            post_coverage("{not json"),
            post_coverage(r#"{"categories": ["shop"]}"#),
            post_coverage(r#"{"threshold": 5, "categories": []}"#),
            Request::get("/nodes/2/reach").body(Body::empty()).unwrap(),
            Request::get("/nodes/abc/reach?threshold=5")
                .body(Body::empty())
                .unwrap(),
        ];

        for request in requests {
            let (status, body) = send(request).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body["error"].is_string(), "{body}");
        }
    }

    #[tokio::test]
    async fn router_unknown_node_is_json_404() {
        let request = Request::get("/nodes/99/reach?threshold=5")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "node 99 not found");
    }

    #[test]
    fn integrity_error_is_internal() {
        let err: AppError = ReachError::Graph(GraphError::Integrity(NodeId(9))).into();
        assert!(matches!(err, AppError::Internal { .. }));

        let err: AppError = ReachError::InvalidThreshold(-1.0).into();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }
}
