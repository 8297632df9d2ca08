use crashboard_execution::{histogram, simulate_batch, summarize, History};
use crashboard_types::{
    validate_multiplier, Histogram, MultiplierError, Outcome, OutcomeSource, Summary,
    MAX_SIMULATION_BATCH,
};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use thiserror::Error as ThisError;

const DEFAULT_HTTP_RATE_LIMIT_PER_SECOND: u64 = 100;
const DEFAULT_HTTP_RATE_LIMIT_BURST: u32 = 200;
const DEFAULT_HTTP_BODY_LIMIT_BYTES: usize = 16 * 1024;

#[derive(Clone, Debug, Serialize)]
pub struct SimulatorConfig {
    /// Seeds the outcome generator; entropy is used when unset.
    pub deterministic_seed: Option<u64>,
    pub max_simulation_batch: Option<usize>,
    pub http_rate_limit_per_second: Option<u64>,
    pub http_rate_limit_burst: Option<u32>,
    pub http_body_limit_bytes: Option<usize>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            deterministic_seed: None,
            max_simulation_batch: Some(MAX_SIMULATION_BATCH),
            http_rate_limit_per_second: Some(DEFAULT_HTTP_RATE_LIMIT_PER_SECOND),
            http_rate_limit_burst: Some(DEFAULT_HTTP_RATE_LIMIT_BURST),
            http_body_limit_bytes: Some(DEFAULT_HTTP_BODY_LIMIT_BYTES),
        }
    }
}

impl SimulatorConfig {
    pub fn simulation_batch_limit(&self) -> usize {
        self.max_simulation_batch
            .unwrap_or(MAX_SIMULATION_BATCH)
            .max(1)
    }

    pub(crate) fn rng(&self) -> StdRng {
        match self.deterministic_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[derive(Debug, ThisError, Clone, PartialEq)]
pub enum DashboardError {
    #[error("invalid multiplier: {0}")]
    InvalidMultiplier(#[from] MultiplierError),
    #[error("simulation count must be at least 1")]
    EmptyBatch,
    #[error("simulation count too large (requested={requested}, max={max})")]
    BatchTooLarge { requested: usize, max: usize },
}

/// Everything a renderer needs after a mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Newest first.
    pub outcomes: Vec<Outcome>,
    /// `None` while the history is empty.
    pub summary: Option<Summary>,
    pub histogram: Histogram,
}

impl Default for DashboardSnapshot {
    fn default() -> Self {
        Self {
            outcomes: Vec::new(),
            summary: None,
            histogram: Histogram::default(),
        }
    }
}

/// The mutable history plus the snapshot derived from it.
///
/// Every mutation ends with a full recompute; the snapshot is never patched in place.
pub struct Dashboard {
    history: History,
    rng: StdRng,
    max_batch: usize,
    snapshot: DashboardSnapshot,
}

impl Dashboard {
    pub fn new(rng: StdRng, max_batch: usize) -> Self {
        Self {
            history: History::new(),
            rng,
            max_batch: max_batch.max(1),
            snapshot: DashboardSnapshot::default(),
        }
    }

    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Record one manually entered multiplier. Rejected input leaves the history untouched.
    pub fn add_manual(
        &mut self,
        multiplier: f64,
        now_ms: u64,
    ) -> Result<&DashboardSnapshot, DashboardError> {
        let multiplier = validate_multiplier(multiplier)?;
        self.history.record(multiplier, now_ms, OutcomeSource::Manual);
        self.recompute();
        Ok(&self.snapshot)
    }

    /// Generate `count` rounds starting at `now_ms` and insert them as one batch.
    pub fn simulate(
        &mut self,
        count: usize,
        now_ms: u64,
    ) -> Result<&DashboardSnapshot, DashboardError> {
        if count == 0 {
            return Err(DashboardError::EmptyBatch);
        }
        if count > self.max_batch {
            return Err(DashboardError::BatchTooLarge {
                requested: count,
                max: self.max_batch,
            });
        }
        let rounds = simulate_batch(&mut self.rng, count, now_ms);
        self.history.record_batch(&rounds, OutcomeSource::Simulated);
        self.recompute();
        Ok(&self.snapshot)
    }

    pub fn clear(&mut self) -> &DashboardSnapshot {
        self.history.clear();
        self.recompute();
        &self.snapshot
    }

    fn recompute(&mut self) {
        let start = Instant::now();
        let outcomes = self.history.as_vec();
        let summary = summarize(&outcomes);
        let histogram = histogram(&outcomes);
        self.snapshot = DashboardSnapshot {
            outcomes,
            summary,
            histogram,
        };
        tracing::debug!(
            outcomes = self.snapshot.outcomes.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "dashboard recomputed"
        );
    }
}
