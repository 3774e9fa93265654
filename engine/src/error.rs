//! Conversion engine error types.

use thiserror::Error;

/// Errors that can occur in the conversion engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// User input was not a positive number. Surfaced as a blocking
    /// validation message; no conversion is attempted.
    #[error("invalid amount {input:?}: enter a value greater than zero")]
    InvalidAmount { input: String },
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
