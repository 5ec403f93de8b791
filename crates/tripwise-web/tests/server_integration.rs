//! Integration tests for the tripwise-web server.
//!
//! These tests start a real axum server on a random port with a stub
//! planner and exercise the REST endpoints.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tripwise::PlannerError;
use tripwise::agent::planner::{PlanFuture, TripPlanner};
use tripwise::trip::TripRequest;
use tripwise_web::{WebConfig, spawn_web};

/// Echoes the request back, or fails like an unreachable model provider.
struct StubPlanner {
    fail: bool,
    calls: AtomicUsize,
}

impl TripPlanner for StubPlanner {
    fn plan<'a>(&'a self, request: &'a TripRequest) -> PlanFuture<'a> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            request.validate()?;
            if self.fail {
                return Err(PlannerError::Api {
                    status: 503,
                    body: "provider overloaded".into(),
                });
            }
            Ok(format!(
                "{} for {} days, ${}/night",
                request.destination,
                request.duration_days,
                request.max_nightly_price()
            ))
        })
    }
}

/// Helper: spawn a test server on port 0 (random available port).
async fn spawn_test_server(fail: bool) -> (Arc<StubPlanner>, String) {
    let planner = Arc::new(StubPlanner {
        fail,
        calls: AtomicUsize::new(0),
    });
    let config = WebConfig {
        bind_addr: ([127, 0, 0, 1], 0).into(),
    };
    let addr = spawn_web(planner.clone(), config).await.unwrap();
    (planner, format!("http://{addr}"))
}

#[tokio::test]
async fn health_returns_ok() {
    let (_planner, base) = spawn_test_server(false).await;

    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn plan_trip_returns_plan() {
    let (planner, base) = spawn_test_server(false).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/plan-trip"))
        .json(&serde_json::json!({"destination": "Paris", "budget": 1500, "duration_days": 5}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["plan"], "Paris for 5 days, $135/night");
    assert_eq!(planner.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn zero_duration_is_unprocessable() {
    let (_planner, base) = spawn_test_server(false).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/plan-trip"))
        .json(&serde_json::json!({"destination": "Paris", "budget": 1500, "duration_days": 0}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert!(json["error"].as_str().unwrap().contains("duration_days"));
}

#[tokio::test]
async fn malformed_body_is_unprocessable_and_skips_planner() {
    let (planner, base) = spawn_test_server(false).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/plan-trip"))
        .json(&serde_json::json!({"destination": "Paris", "budget": "lots"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert!(json["error"].is_string());
    assert_eq!(planner.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn planner_failure_is_bad_gateway() {
    let (_planner, base) = spawn_test_server(true).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/plan-trip"))
        .json(&serde_json::json!({"destination": "Tokyo", "budget": 2000, "duration_days": 7}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 502);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert!(json["error"].as_str().unwrap().contains("503"));
}
