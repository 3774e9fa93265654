//! Amount input validation.

use crate::error::{EngineError, EngineResult};

/// Parse a confirmed amount, rejecting anything that is not a positive
/// finite number. Rejection happens before any conversion is attempted.
pub fn parse_amount(raw: &str) -> EngineResult<f64> {
    let invalid = || EngineError::InvalidAmount {
        input: raw.to_string(),
    };

    let amount: f64 = raw.trim().parse().map_err(|_| invalid())?;

    if !amount.is_finite() || amount <= 0.0 {
        return Err(invalid());
    }

    Ok(amount)
}

/// Parse amount input for live recomputation: anything unparseable
/// counts as zero, so the display just shows a zero result while the
/// user is mid-edit.
pub fn parse_loose(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite())
        .unwrap_or(0.0)
}
