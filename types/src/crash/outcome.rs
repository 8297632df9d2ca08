use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use super::{MAX_MULTIPLIER, MIN_MULTIPLIER, MULTIPLIER_DECIMALS};

/// Reasons a manually entered multiplier is refused.
#[derive(Debug, ThisError, Clone, PartialEq)]
pub enum MultiplierError {
    #[error("multiplier is not a number (input={input:?})")]
    NotNumeric { input: String },
    #[error("multiplier is not finite")]
    NotFinite,
    #[error("multiplier out of range (got={got}, min={min}, max={max})")]
    OutOfRange { got: f64, min: f64, max: f64 },
}

/// How an outcome entered the history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeSource {
    Manual,
    Simulated,
}

/// One recorded crash round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Unique within a history; only used for stable list identity.
    pub id: u64,
    /// Crash point, already rounded to two decimals.
    pub multiplier: f64,
    /// Unix milliseconds the round was recorded (or simulated) for.
    pub timestamp_ms: u64,
    pub source: OutcomeSource,
}

/// Round a multiplier to the stored precision (half away from zero).
pub fn round_multiplier(value: f64) -> f64 {
    let scale = 10f64.powi(MULTIPLIER_DECIMALS);
    (value * scale).round() / scale
}

/// Check a manually entered multiplier and return it at stored precision.
///
/// The range check runs on the raw value, so `100.004` is refused even though it would
/// round to `100.00`.
pub fn validate_multiplier(value: f64) -> Result<f64, MultiplierError> {
    if !value.is_finite() {
        return Err(MultiplierError::NotFinite);
    }
    if !(MIN_MULTIPLIER..=MAX_MULTIPLIER).contains(&value) {
        return Err(MultiplierError::OutOfRange {
            got: value,
            min: MIN_MULTIPLIER,
            max: MAX_MULTIPLIER,
        });
    }
    Ok(round_multiplier(value))
}

/// Parse free-form user input into a validated multiplier.
pub fn parse_multiplier(input: &str) -> Result<f64, MultiplierError> {
    let trimmed = input.trim();
    let value: f64 = trimmed.parse().map_err(|_| MultiplierError::NotNumeric {
        input: trimmed.to_string(),
    })?;
    validate_multiplier(value)
}
