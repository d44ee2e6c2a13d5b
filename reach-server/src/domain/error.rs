//! Domain error types.
//!
//! These errors represent validation failures of raw input values.
//! They are distinct from graph structure and IO errors.

/// Domain-level errors for value validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Cost is negative, NaN or infinite
    #[error("invalid cost {0}: must be a finite non-negative number")]
    InvalidCost(f64),

    /// Category label is blank
    #[error("invalid category label: {0:?}")]
    InvalidCategory(String),
}
