use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

const LATENCY_BUCKET_COUNT: usize = 10;
const LATENCY_BUCKETS_US: [u64; LATENCY_BUCKET_COUNT] =
    [10, 25, 50, 100, 250, 500, 1_000, 5_000, 25_000, 100_000];

#[derive(Clone, Debug, Serialize)]
pub struct LatencySnapshot {
    pub buckets_us: Vec<u64>,
    pub counts: Vec<u64>,
    pub overflow: u64,
    pub count: u64,
    pub avg_us: f64,
    pub max_us: u64,
}

#[derive(Default)]
struct LatencyMetrics {
    buckets: [AtomicU64; LATENCY_BUCKET_COUNT],
    overflow: AtomicU64,
    count: AtomicU64,
    total_us: AtomicU64,
    max_us: AtomicU64,
}

impl LatencyMetrics {
    fn record(&self, duration: Duration) {
        let us = duration.as_micros() as u64;
        self.count.fetch_add(1, Ordering::Relaxed);
        self.total_us.fetch_add(us, Ordering::Relaxed);
        self.max_us.fetch_max(us, Ordering::Relaxed);

        match LATENCY_BUCKETS_US.iter().position(|bucket| us <= *bucket) {
            Some(idx) => {
                self.buckets[idx].fetch_add(1, Ordering::Relaxed);
            }
            None => {
                self.overflow.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn snapshot(&self) -> LatencySnapshot {
        let count = self.count.load(Ordering::Relaxed);
        let total_us = self.total_us.load(Ordering::Relaxed);
        let avg_us = if count > 0 {
            total_us as f64 / count as f64
        } else {
            0.0
        };

        LatencySnapshot {
            buckets_us: LATENCY_BUCKETS_US.to_vec(),
            counts: self
                .buckets
                .iter()
                .map(|bucket| bucket.load(Ordering::Relaxed))
                .collect(),
            overflow: self.overflow.load(Ordering::Relaxed),
            count,
            avg_us,
            max_us: self.max_us.load(Ordering::Relaxed),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct HttpMetricsSnapshot {
    pub add_outcome: LatencySnapshot,
    pub simulate: LatencySnapshot,
    pub clear: LatencySnapshot,
    pub rejected_entries: u64,
    pub rejected_batches: u64,
    pub reject_rate_limit: u64,
    pub reject_body_limit: u64,
}

/// Per-endpoint latency for mutations plus rejection counters.
#[derive(Default)]
pub struct HttpMetrics {
    add_outcome: LatencyMetrics,
    simulate: LatencyMetrics,
    clear: LatencyMetrics,
    rejected_entries: AtomicU64,
    rejected_batches: AtomicU64,
    reject_rate_limit: AtomicU64,
    reject_body_limit: AtomicU64,
}

impl HttpMetrics {
    pub fn record_add_outcome(&self, duration: Duration) {
        self.add_outcome.record(duration);
    }

    pub fn record_simulate(&self, duration: Duration) {
        self.simulate.record(duration);
    }

    pub fn record_clear(&self, duration: Duration) {
        self.clear.record(duration);
    }

    pub fn inc_rejected_entry(&self) {
        self.rejected_entries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_rejected_batch(&self) {
        self.rejected_batches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_reject_rate_limit(&self) {
        self.reject_rate_limit.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_reject_body_limit(&self) {
        self.reject_body_limit.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> HttpMetricsSnapshot {
        HttpMetricsSnapshot {
            add_outcome: self.add_outcome.snapshot(),
            simulate: self.simulate.snapshot(),
            clear: self.clear.snapshot(),
            rejected_entries: self.rejected_entries.load(Ordering::Relaxed),
            rejected_batches: self.rejected_batches.load(Ordering::Relaxed),
            reject_rate_limit: self.reject_rate_limit.load(Ordering::Relaxed),
            reject_body_limit: self.reject_body_limit.load(Ordering::Relaxed),
        }
    }
}
