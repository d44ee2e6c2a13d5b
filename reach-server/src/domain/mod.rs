//! Domain types for the accessibility engine.
//!
//! This module contains the value types shared by every layer. Types
//! enforce their invariants at construction time, so code that receives
//! them can trust their validity.

mod category;
mod cost;
mod error;
mod node;
mod record;

pub use category::Category;
pub use cost::Cost;
pub use error::DomainError;
pub use node::NodeId;
pub use record::{EdgeRecord, NodeRecord};
