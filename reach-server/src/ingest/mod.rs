//! Loading of node and edge tables.
//!
//! Nodes come from a CSV with `id,label` columns, where an empty label
//! means the node offers no service. Edges come from a CSV with
//! `source,target,weight` columns; the same pair may appear several times.

mod error;
mod table;

pub use error::IngestError;
pub use table::{Dataset, read_edges, read_nodes, write_covered};
