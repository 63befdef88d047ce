//! Error types for the metaballs core.

use thiserror::Error;

/// Errors produced by metaballs operations.
#[derive(Debug, Error)]
pub enum MetaballError {
    /// A source radius was zero, negative, or not finite.
    #[error("invalid source: radius must be finite and > 0, got {radius}")]
    InvalidSource { radius: f64 },

    /// The grid spacing was zero, negative, or not finite.
    #[error("invalid grid: gap must be finite and > 0, got {gap}")]
    InvalidGrid { gap: f64 },

    /// Canvas bounds were zero, negative, or not finite.
    #[error("invalid dimensions: width and height must be finite and > 0, got {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    /// The designated steerable source does not exist.
    #[error("steering index {index} out of range for {len} sources")]
    SteeringOutOfRange { index: usize, len: usize },

    /// Writing a snapshot failed.
    #[error("I/O error: {0}")]
    Io(String),
}
