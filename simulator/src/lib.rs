use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;
use tracing::{info, warn};

mod api;
pub use api::Api;

mod metrics;
pub use metrics::{HttpMetrics, HttpMetricsSnapshot, LatencySnapshot};

mod state;
pub use state::{Dashboard, DashboardError, DashboardSnapshot, SimulatorConfig};

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

/// Shared application state behind the HTTP API.
pub struct Simulator {
    config: SimulatorConfig,
    dashboard: RwLock<Dashboard>,
    http_metrics: HttpMetrics,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    pub fn new() -> Self {
        Self::new_with_config(SimulatorConfig::default())
    }

    pub fn new_with_config(config: SimulatorConfig) -> Self {
        let dashboard = Dashboard::new(config.rng(), config.simulation_batch_limit());
        info!(
            seeded = config.deterministic_seed.is_some(),
            max_simulation_batch = config.simulation_batch_limit(),
            "dashboard initialized"
        );
        Self {
            config,
            dashboard: RwLock::new(dashboard),
            http_metrics: HttpMetrics::default(),
        }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn http_metrics(&self) -> &HttpMetrics {
        &self.http_metrics
    }

    pub fn http_metrics_snapshot(&self) -> HttpMetricsSnapshot {
        self.http_metrics.snapshot()
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.dashboard.read().await.snapshot().clone()
    }

    pub async fn add_manual(&self, multiplier: f64) -> Result<DashboardSnapshot, DashboardError> {
        let start = Instant::now();
        let mut dashboard = self.dashboard.write().await;
        let result = dashboard.add_manual(multiplier, now_ms()).cloned();
        drop(dashboard);
        self.http_metrics.record_add_outcome(start.elapsed());

        match &result {
            Ok(snapshot) => info!(
                multiplier = snapshot.outcomes.first().map(|o| o.multiplier),
                outcomes = snapshot.outcomes.len(),
                "manual outcome recorded"
            ),
            Err(err) => {
                self.http_metrics.inc_rejected_entry();
                warn!(input = multiplier, %err, "manual outcome rejected");
            }
        }
        result
    }

    pub async fn simulate(&self, count: usize) -> Result<DashboardSnapshot, DashboardError> {
        let start = Instant::now();
        let mut dashboard = self.dashboard.write().await;
        let result = dashboard.simulate(count, now_ms()).cloned();
        drop(dashboard);
        self.http_metrics.record_simulate(start.elapsed());

        match &result {
            Ok(snapshot) => info!(
                count,
                outcomes = snapshot.outcomes.len(),
                "simulated rounds recorded"
            ),
            Err(err) => {
                self.http_metrics.inc_rejected_batch();
                warn!(count, %err, "simulation rejected");
            }
        }
        result
    }

    pub async fn clear(&self) -> DashboardSnapshot {
        let start = Instant::now();
        let snapshot = self.dashboard.write().await.clear().clone();
        self.http_metrics.record_clear(start.elapsed());
        info!("history cleared");
        snapshot
    }
}
