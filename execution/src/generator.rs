//! Synthetic crash multiplier generation.
//!
//! A single uniform roll picks one of four tiers, then a second, independent uniform draw
//! places the result inside that tier:
//!
//! | roll          | mass | output          |
//! |---------------|------|-----------------|
//! | `[0.00,0.50)` | 50%  | `[1.0, 2.0)`    |
//! | `[0.50,0.80)` | 30%  | `[2.0, 5.0)`    |
//! | `[0.80,0.95)` | 15%  | `[5.0, 10.0)`   |
//! | `[0.95,1.00)` | 5%   | `[10.0, 50.0)`  |
//!
//! This is a hand-tuned, heavy-tailed toy distribution. It is not provably fair and does not
//! model any real game's house edge.

use crashboard_types::round_multiplier;
use rand::Rng;

/// One slice of the crash distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrashTier {
    /// Exclusive upper bound of the selector roll for this tier.
    pub roll_below: f64,
    /// Probability mass of the tier.
    pub probability: f64,
    /// Smallest multiplier the tier produces.
    pub base: f64,
    /// Width of the tier's output range.
    pub span: f64,
}

impl CrashTier {
    /// Exclusive upper bound of the tier's output range.
    pub fn ceiling(&self) -> f64 {
        self.base + self.span
    }
}

/// Tiers in roll order. Probabilities sum to 1.
pub const CRASH_TIERS: [CrashTier; 4] = [
    CrashTier {
        roll_below: 0.5,
        probability: 0.5,
        base: 1.0,
        span: 1.0,
    },
    CrashTier {
        roll_below: 0.8,
        probability: 0.3,
        base: 2.0,
        span: 3.0,
    },
    CrashTier {
        roll_below: 0.95,
        probability: 0.15,
        base: 5.0,
        span: 5.0,
    },
    CrashTier {
        roll_below: 1.0,
        probability: 0.05,
        base: 10.0,
        span: 40.0,
    },
];

/// Select the tier for a selector roll in `[0, 1)`.
pub fn tier_for_roll(roll: f64) -> &'static CrashTier {
    CRASH_TIERS
        .iter()
        .find(|tier| roll < tier.roll_below)
        .unwrap_or(&CRASH_TIERS[CRASH_TIERS.len() - 1])
}

/// Draw one crash multiplier in `[1.0, 50.0)`.
///
/// Uses two independent uniform draws: one to select the tier and one to scale within it.
/// Collapsing these into a single draw would change the distribution.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let roll: f64 = rng.gen();
    let tier = tier_for_roll(roll);
    let u: f64 = rng.gen();
    tier.base + u * tier.span
}

/// Draw one crash multiplier at stored precision (two decimals).
pub fn generate_rounded<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    round_multiplier(generate(rng))
}
