//! CSV readers and writers.

use std::collections::BTreeSet;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::IngestError;
use crate::domain::{EdgeRecord, NodeId, NodeRecord};
use crate::network::GraphStore;
use crate::reach::CategoryIndex;

/// Everything the engine needs, loaded from one node and one edge table.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub graph: GraphStore,
    pub index: CategoryIndex,
}

impl Dataset {
    /// Load and build the graph and category index.
    pub fn load(nodes_path: &Path, edges_path: &Path) -> Result<Self, IngestError> {
        let nodes = read_nodes(nodes_path)?;
        let edges = read_edges(edges_path)?;
        Ok(Self::from_records(&nodes, &edges)?)
    }

    pub fn from_records(
        nodes: &[NodeRecord],
        edges: &[EdgeRecord],
    ) -> Result<Self, crate::network::GraphError> {
        Ok(Self {
            graph: GraphStore::build(nodes, edges)?,
            index: CategoryIndex::build(nodes),
        })
    }
}

/// Read a node table.
pub fn read_nodes(path: &Path) -> Result<Vec<NodeRecord>, IngestError> {
    read_table(path)
}

/// Read an edge table.
pub fn read_edges(path: &Path) -> Result<Vec<EdgeRecord>, IngestError> {
    read_table(path)
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, IngestError> {
    let csv_err = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let rows = reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(csv_err)?;

    debug!(path = %path.display(), rows = rows.len(), "table loaded");
    Ok(rows)
}

/// Write covered node ids, ascending, as a one-column CSV with an `id` header.
pub fn write_covered(path: &Path, covered: &BTreeSet<NodeId>) -> Result<(), IngestError> {
    let csv_err = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer.write_record(["id"]).map_err(csv_err)?;
    for id in covered {
        writer.write_record([id.to_string()]).map_err(csv_err)?;
    }
    writer.flush().map_err(|source: io::Error| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
