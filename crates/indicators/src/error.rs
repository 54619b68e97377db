//! Computation error types.

use thiserror::Error;

use crate::traits::Primitive;

/// Errors that can occur while computing a primitive series.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputeError {
    /// Invalid parameters for the primitive
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// The primitive got the wrong kind or number of input series
    #[error("{primitive} expects {expected}, got {actual} input series")]
    MissingInput {
        /// Primitive that was invoked.
        primitive: Primitive,
        /// Description of the expected input.
        expected: &'static str,
        /// Number of series that were supplied.
        actual: usize,
    },

    /// Input series length differs from the bar series
    #[error("series length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Length of the bound bar series.
        expected: usize,
        /// Length of the offending input series.
        actual: usize,
    },
}

impl ComputeError {
    /// Creates an `InvalidParams` error with a message.
    #[must_use]
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        ComputeError::InvalidParams(msg.into())
    }
}
