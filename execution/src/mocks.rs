use crashboard_types::{Outcome, OutcomeSource};
use rand::{rngs::StdRng, SeedableRng};

/// Timestamp used for fixtures that do not care about time.
pub const MOCK_TIMESTAMP_MS: u64 = 1_700_000_000_000;

/// Creates a seeded random source for reproducible tests
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a manual outcome with the given id and multiplier
pub fn create_outcome(id: u64, multiplier: f64) -> Outcome {
    Outcome {
        id,
        multiplier,
        timestamp_ms: MOCK_TIMESTAMP_MS + id * 1_000,
        source: OutcomeSource::Manual,
    }
}

/// Creates outcomes for a list of multipliers, ids assigned in order
pub fn create_outcomes(multipliers: &[f64]) -> Vec<Outcome> {
    multipliers
        .iter()
        .enumerate()
        .map(|(idx, multiplier)| create_outcome(idx as u64, *multiplier))
        .collect()
}
