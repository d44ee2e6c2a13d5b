//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, CoverageCache};
use crate::ingest::Dataset;
use crate::reach::{EngineConfig, ReachabilityEngine};

/// Shared application state.
///
/// The dataset is loaded once and never mutated while serving.
#[derive(Clone)]
pub struct AppState {
    /// Graph and category index
    pub data: Arc<Dataset>,

    /// Reachability engine
    pub engine: Arc<ReachabilityEngine>,

    /// Coverage report cache
    pub cache: Arc<CoverageCache>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(data: Dataset, engine_config: EngineConfig, cache_config: &CacheConfig) -> Self {
        Self {
            data: Arc::new(data),
            engine: Arc::new(ReachabilityEngine::new(engine_config)),
            cache: Arc::new(CoverageCache::new(cache_config)),
        }
    }
}
