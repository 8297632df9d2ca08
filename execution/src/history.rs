//! Bounded, newest-first outcome history.

use std::collections::VecDeque;

use crashboard_types::{Outcome, OutcomeSource, HISTORY_CAPACITY};
use tracing::debug;

use crate::simulation::SimulatedRound;

/// The outcome list the application layer owns and mutates.
///
/// Holds at most [`HISTORY_CAPACITY`] entries; inserting past that silently drops the
/// oldest. Ids are monotonic for the lifetime of the history and survive [`History::clear`].
#[derive(Clone, Debug)]
pub struct History {
    outcomes: VecDeque<Outcome>,
    next_id: u64,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            outcomes: VecDeque::with_capacity(HISTORY_CAPACITY),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter()
    }

    pub fn latest(&self) -> Option<&Outcome> {
        self.outcomes.front()
    }

    /// Newest-first copy for the statistics engine and for serving.
    pub fn as_vec(&self) -> Vec<Outcome> {
        self.outcomes.iter().cloned().collect()
    }

    /// Record one outcome at the front of the history.
    ///
    /// `multiplier` must already be validated and rounded.
    pub fn record(&mut self, multiplier: f64, timestamp_ms: u64, source: OutcomeSource) -> &Outcome {
        self.push(multiplier, timestamp_ms, source);
        self.enforce_retention();
        &self.outcomes[0]
    }

    /// Record a simulated batch in generation order, so the last generated round ends up
    /// newest. Retention is applied once, after the whole batch is in.
    pub fn record_batch(&mut self, rounds: &[SimulatedRound], source: OutcomeSource) -> usize {
        for round in rounds {
            self.push(round.multiplier, round.timestamp_ms, source);
        }
        self.enforce_retention();
        rounds.len()
    }

    /// Drop every outcome. Ids keep counting up.
    pub fn clear(&mut self) {
        self.outcomes.clear();
    }

    fn push(&mut self, multiplier: f64, timestamp_ms: u64, source: OutcomeSource) {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.outcomes.push_front(Outcome {
            id,
            multiplier,
            timestamp_ms,
            source,
        });
    }

    fn enforce_retention(&mut self) {
        if self.outcomes.len() <= HISTORY_CAPACITY {
            return;
        }
        let dropped = self.outcomes.len() - HISTORY_CAPACITY;
        self.outcomes.truncate(HISTORY_CAPACITY);
        debug!(dropped, retained = HISTORY_CAPACITY, "history retention applied");
    }
}
