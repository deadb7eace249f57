//! Error types for crop planning.

use thiserror::Error;

/// Result type for planning operations.
pub type PlanResult<T> = Result<T, PlanError>;

/// Errors raised before a crop plan can be built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("Invalid input: source dimensions must be positive and finite (got {width}x{height})")]
    InvalidInput { width: f64, height: f64 },
}

impl PlanError {
    /// Create an invalid-input error for the given dimensions.
    pub fn invalid_input(width: f64, height: f64) -> Self {
        Self::InvalidInput { width, height }
    }
}
