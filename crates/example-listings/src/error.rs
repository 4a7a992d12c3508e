//! Error types for the example-listings crate.

use thiserror::Error;

/// Errors raised while preparing listing generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    /// The anchor coordinate is not a finite point on the globe.
    #[error("anchor {field} must be within [{min}, {max}], got {value}")]
    AnchorOutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },

    /// The spread radius is negative or not finite.
    #[error("anchor spread must be a finite, non-negative number of metres, got {value}")]
    InvalidSpread {
        /// Rejected spread in metres.
        value: f64,
    },
}
