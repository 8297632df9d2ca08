//! Crashboard execution layer.
//!
//! This crate holds the stateless core used by the simulator: the synthetic crash
//! [`generator`], the [`statistics`] engine and its fixed histogram, batch [`simulation`], and
//! the bounded [`History`] the application layer owns.
//!
//! ## Purity
//! - `generate`, `summarize` and `histogram` keep no state between calls.
//! - Randomness only comes from the `Rng` handed in by the caller, so a seeded `StdRng`
//!   reproduces a run exactly.
//! - Nothing here validates multipliers. Manual input must go through
//!   [`crashboard_types::validate_multiplier`] before it reaches [`History::record`].
//!
//! ## Recompute after every mutation (example)
//! ```rust
//! use crashboard_execution::{histogram, simulate_batch, summarize, History};
//! use crashboard_types::OutcomeSource;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut history = History::new();
//!
//! let rounds = simulate_batch(&mut rng, 10, 1_700_000_000_000);
//! history.record_batch(&rounds, OutcomeSource::Simulated);
//!
//! let outcomes = history.as_vec();
//! let summary = summarize(&outcomes).expect("history is not empty");
//! assert_eq!(summary.count, 10);
//! assert_eq!(histogram(&outcomes).total(), 10);
//! ```

pub mod generator;
pub mod history;
pub mod simulation;
pub mod statistics;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use generator::{generate, generate_rounded, tier_for_roll, CrashTier, CRASH_TIERS};
pub use history::History;
pub use simulation::{simulate_batch, SimulatedRound};
pub use statistics::{bucket_for, histogram, summarize};
