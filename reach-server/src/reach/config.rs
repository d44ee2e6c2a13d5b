//! Engine configuration.

/// How the bounded search treats nodes it has already expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SearchMode {
    /// No closed set: a node may be popped and relaxed more than once.
    Reference,

    /// Each node is expanded at most once; later pops are skipped.
    #[default]
    Settled,
}

/// Configuration parameters for reachability evaluation.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Frontier handling of the bounded search.
    pub mode: SearchMode,

    /// Evaluate categories on the rayon pool.
    /// Only overlay evaluation runs in parallel; the in-place bracket
    /// mutates the graph and is always sequential.
    pub parallel: bool,
}

impl EngineConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(mode: SearchMode, parallel: bool) -> Self {
        Self { mode, parallel }
    }
}
