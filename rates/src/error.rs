//! Rate store error types.

use cambio_common::Currency;
use thiserror::Error;

/// Errors that can occur while fetching rates.
///
/// None of these escape the rate store: every failure is recovered by
/// substituting fallback data (see [`crate::store::RateStore::load`]).
#[derive(Debug, Error)]
pub enum RateError {
    /// Network-level request failure.
    #[error("rate request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Rate service answered with a non-success status.
    #[error("rate service returned status {status} for base {base}")]
    Status { base: Currency, status: u16 },

    /// Response body was not the expected `rates` mapping.
    #[error("malformed rate payload for base {0}")]
    MalformedPayload(Currency),

    /// Response carried no usable (positive) rates.
    #[error("no usable rates for base {0}")]
    EmptyTable(Currency),

    /// Provider has no rates for the requested base.
    #[error("no rates available for base {0}")]
    Unavailable(Currency),
}

/// Result type for rate operations.
pub type RateResult<T> = Result<T, RateError>;
