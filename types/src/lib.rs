//! Shared data model for crashboard.
//!
//! Everything here is plain data: recorded [`Outcome`]s, the derived [`Summary`] and
//! [`Histogram`], and the validation applied to manually entered multipliers before they
//! reach the execution layer.

pub mod crash;

pub use crash::{
    parse_multiplier, round_multiplier, validate_multiplier, Bucket, BucketCount, Histogram,
    HistogramError, MultiplierError, Outcome, OutcomeSource, Summary, HIGH_CRASH_THRESHOLD,
    HISTORY_CAPACITY, LOW_CRASH_THRESHOLD, MAX_MULTIPLIER, MAX_SIMULATION_BATCH, MIN_MULTIPLIER,
    MOON_CRASH_THRESHOLD, MULTIPLIER_DECIMALS, SIMULATION_SPACING_MS,
};
