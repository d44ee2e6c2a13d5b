//! X-minute accessibility over the transport network.
//!
//! For every category a virtual source is linked at zero cost to all of the
//! category's members and a threshold-bounded shortest-path search marks
//! the nodes it reaches. Nodes marked for every category are covered.

mod categories;
mod config;
mod coverage;
mod matrix;
mod search;


pub use categories::CategoryIndex;
pub use config::{EngineConfig, SearchMode};
pub use coverage::{CoverageReport, aggregate};
pub use matrix::ReachabilityMatrix;
pub use search::{ReachError, ReachabilityEngine, SearchOutcome, bounded_search};
