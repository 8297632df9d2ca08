use axum::{
    extract::State as AxumState,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use crashboard_types::{
    parse_multiplier, HISTORY_CAPACITY, MAX_MULTIPLIER, MIN_MULTIPLIER, SIMULATION_SPACING_MS,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{DashboardError, DashboardSnapshot, Simulator};

#[derive(Serialize)]
struct HealthzResponse {
    ok: bool,
}

#[derive(Serialize)]
struct ConfigResponse {
    history_capacity: usize,
    max_simulation_batch: usize,
    min_multiplier: f64,
    max_multiplier: f64,
    simulation_spacing_ms: u64,
    deterministic: bool,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// A manual entry as typed into a form field or sent as a JSON number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum ManualEntry {
    Number(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
pub(super) struct AddOutcomeRequest {
    multiplier: ManualEntry,
}

#[derive(Debug, Deserialize)]
pub(super) struct SimulateRequest {
    count: usize,
}

fn rejected(err: DashboardError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

fn snapshot_response(result: Result<DashboardSnapshot, DashboardError>) -> Response {
    match result {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(err) => rejected(err),
    }
}

pub(super) async fn healthz() -> Response {
    Json(HealthzResponse { ok: true }).into_response()
}

pub(super) async fn config(AxumState(simulator): AxumState<Arc<Simulator>>) -> Response {
    let config = simulator.config();
    Json(ConfigResponse {
        history_capacity: HISTORY_CAPACITY,
        max_simulation_batch: config.simulation_batch_limit(),
        min_multiplier: MIN_MULTIPLIER,
        max_multiplier: MAX_MULTIPLIER,
        simulation_spacing_ms: SIMULATION_SPACING_MS,
        deterministic: config.deterministic_seed.is_some(),
    })
    .into_response()
}

pub(super) async fn dashboard(AxumState(simulator): AxumState<Arc<Simulator>>) -> Response {
    Json(simulator.snapshot().await).into_response()
}

pub(super) async fn outcomes(AxumState(simulator): AxumState<Arc<Simulator>>) -> Response {
    Json(simulator.snapshot().await.outcomes).into_response()
}

pub(super) async fn summary(AxumState(simulator): AxumState<Arc<Simulator>>) -> Response {
    Json(simulator.snapshot().await.summary).into_response()
}

pub(super) async fn histogram(AxumState(simulator): AxumState<Arc<Simulator>>) -> Response {
    Json(simulator.snapshot().await.histogram).into_response()
}

pub(super) async fn add_outcome(
    AxumState(simulator): AxumState<Arc<Simulator>>,
    Json(payload): Json<AddOutcomeRequest>,
) -> Response {
    let multiplier = match payload.multiplier {
        ManualEntry::Number(value) => value,
        ManualEntry::Text(input) => match parse_multiplier(&input) {
            Ok(value) => value,
            Err(err) => {
                simulator.http_metrics().inc_rejected_entry();
                tracing::warn!(input = %input, %err, "manual outcome rejected");
                return rejected(err.into());
            }
        },
    };
    snapshot_response(simulator.add_manual(multiplier).await)
}

pub(super) async fn simulate(
    AxumState(simulator): AxumState<Arc<Simulator>>,
    Json(payload): Json<SimulateRequest>,
) -> Response {
    snapshot_response(simulator.simulate(payload.count).await)
}

pub(super) async fn clear(AxumState(simulator): AxumState<Arc<Simulator>>) -> Response {
    Json(simulator.clear().await).into_response()
}

pub(super) async fn http_metrics(AxumState(simulator): AxumState<Arc<Simulator>>) -> Response {
    Json(simulator.http_metrics_snapshot()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimulatorConfig;
    use axum::body::to_bytes;
    use serde_json::Value;

    fn simulator() -> Arc<Simulator> {
        Arc::new(Simulator::new_with_config(SimulatorConfig {
            deterministic_seed: Some(7),
            max_simulation_batch: Some(50),
            ..SimulatorConfig::default()
        }))
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn entry(json: &str) -> AddOutcomeRequest {
        serde_json::from_str(json).expect("request")
    }

    #[tokio::test]
    async fn test_healthz() {
        let response = healthz().await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["ok"], Value::Bool(true));
    }

    #[tokio::test]
    async fn test_config_reports_limits() {
        let response = config(AxumState(simulator())).await;
        let body = body_json(response).await;
        assert_eq!(body["history_capacity"], 100);
        assert_eq!(body["max_simulation_batch"], 50);
        assert_eq!(body["max_multiplier"], 100.0);
        assert_eq!(body["deterministic"], true);
    }

    #[tokio::test]
    async fn test_add_outcome_accepts_text_and_number() {
        let simulator = simulator();
        let response =
            add_outcome(AxumState(simulator.clone()), Json(entry(r#"{"multiplier":" 2.345 "}"#)))
                .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response =
            add_outcome(AxumState(simulator.clone()), Json(entry(r#"{"multiplier":7.5}"#))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["outcomes"][0]["multiplier"], 7.5);
        assert_eq!(body["outcomes"][1]["multiplier"], 2.35);
        assert_eq!(body["outcomes"][0]["source"], "manual");
        assert_eq!(body["summary"]["count"], 2);
    }

    #[tokio::test]
    async fn test_add_outcome_rejects_bad_input() {
        let simulator = simulator();
        for json in [
            r#"{"multiplier":"abc"}"#,
            r#"{"multiplier":""}"#,
            r#"{"multiplier":0.5}"#,
            r#"{"multiplier":"100.01"}"#,
        ] {
            let response = add_outcome(AxumState(simulator.clone()), Json(entry(json))).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{json}");
            let body = body_json(response).await;
            assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
        }
        assert!(simulator.snapshot().await.outcomes.is_empty());
        assert_eq!(simulator.http_metrics_snapshot().rejected_entries, 4);
    }

    #[tokio::test]
    async fn test_simulate_and_queries() {
        let simulator = simulator();
        let response = simulate(
            AxumState(simulator.clone()),
            Json(SimulateRequest { count: 10 }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let outcomes = body_json(outcomes(AxumState(simulator.clone())).await).await;
        assert_eq!(outcomes.as_array().map(Vec::len), Some(10));

        let histogram = body_json(histogram(AxumState(simulator.clone())).await).await;
        let buckets = histogram.as_array().expect("bucket list");
        assert_eq!(buckets.len(), 6);
        let total: u64 = buckets.iter().filter_map(|b| b["count"].as_u64()).sum();
        assert_eq!(total, 10);
        assert_eq!(buckets[0]["label"], "1.00x-1.49x");

        let summary = body_json(summary(AxumState(simulator.clone())).await).await;
        assert_eq!(summary["count"], 10);
    }

    #[tokio::test]
    async fn test_simulate_rejects_bad_counts() {
        let simulator = simulator();
        for count in [0, 51] {
            let response = simulate(
                AxumState(simulator.clone()),
                Json(SimulateRequest { count }),
            )
            .await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
        assert_eq!(simulator.http_metrics_snapshot().rejected_batches, 2);
    }

    #[tokio::test]
    async fn test_clear_returns_empty_snapshot() {
        let simulator = simulator();
        simulator.simulate(5).await.expect("simulate");
        let body = body_json(clear(AxumState(simulator.clone())).await).await;
        assert_eq!(body["outcomes"].as_array().map(Vec::len), Some(0));
        assert_eq!(body["summary"], Value::Null);

        let summary = body_json(summary(AxumState(simulator)).await).await;
        assert_eq!(summary, Value::Null);
    }

    #[tokio::test]
    async fn test_dashboard_snapshot_shape() {
        let simulator = simulator();
        let body = body_json(dashboard(AxumState(simulator)).await).await;
        assert!(body["outcomes"].is_array());
        assert!(body["summary"].is_null());
        assert_eq!(body["histogram"].as_array().map(Vec::len), Some(6));
    }
}
