//! X-minute accessibility engine.
//!
//! Answers: "which nodes of this network can reach at least one member of
//! every category within a travel-cost threshold?"

pub mod bench;
pub mod cache;
pub mod domain;
pub mod ingest;
pub mod network;
pub mod reach;
pub mod web;
