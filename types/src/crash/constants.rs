/// Smallest multiplier accepted for a recorded round.
pub const MIN_MULTIPLIER: f64 = 1.0;

/// Largest multiplier accepted for a manually entered round.
pub const MAX_MULTIPLIER: f64 = 100.0;

/// Number of outcomes retained in history (newest first).
pub const HISTORY_CAPACITY: usize = 100;

/// Spacing between synthetic timestamps within one simulated batch.
pub const SIMULATION_SPACING_MS: u64 = 1_000;

/// Default cap on the number of rounds produced by one simulate action.
pub const MAX_SIMULATION_BATCH: usize = 1_000;

/// Multipliers are stored with this many decimal places.
pub const MULTIPLIER_DECIMALS: i32 = 2;

/// Rounds strictly below this count as "low" crashes.
pub const LOW_CRASH_THRESHOLD: f64 = 2.0;

/// Rounds at or above this count as "high" crashes.
pub const HIGH_CRASH_THRESHOLD: f64 = 5.0;

/// Rounds at or above this count as "moon" crashes.
pub const MOON_CRASH_THRESHOLD: f64 = 10.0;
