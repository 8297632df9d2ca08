//! Batch simulation of crash rounds.

use crashboard_types::SIMULATION_SPACING_MS;
use rand::Rng;

use crate::generator::generate_rounded;

/// A generated round before the history assigns it an id.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulatedRound {
    pub multiplier: f64,
    pub timestamp_ms: u64,
}

/// Generate `count` rounds eagerly, in generation order.
///
/// Timestamps start at `start_ms` and are spaced [`SIMULATION_SPACING_MS`] apart. The whole
/// batch exists before the caller touches its history, so a simulate action is applied
/// atomically or not at all.
pub fn simulate_batch<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    start_ms: u64,
) -> Vec<SimulatedRound> {
    (0..count as u64)
        .map(|idx| SimulatedRound {
            multiplier: generate_rounded(rng),
            timestamp_ms: start_ms.saturating_add(idx.saturating_mul(SIMULATION_SPACING_MS)),
        })
        .collect()
}
