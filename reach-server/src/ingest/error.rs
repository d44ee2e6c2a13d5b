//! Ingestion error types.

use std::path::PathBuf;

use crate::network::GraphError;

/// Errors that can occur while loading or writing tabular data.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// CSV reading, parsing or writing failed
    #[error("CSV error in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// File could not be created or flushed
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Records were read but do not form a valid graph
    #[error(transparent)]
    Graph(#[from] GraphError),
}
