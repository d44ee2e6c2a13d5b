//! Web layer for the accessibility engine.
//!
//! Provides HTTP endpoints for coverage queries over a loaded network.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
