//! `get_weather_info` against mock geocoding and forecast servers.

mod common;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use common::{Hits, closed_port, http_client, serve};
use serde_json::json;
use tripwise::tools::core::Tool;
use tripwise::tools::failure::FailureKind;
use tripwise::tools::weather::WeatherLookup;

type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

fn paris_geocoder(hits: Hits, seen: Seen) -> Router {
    Router::new().route(
        "/v1/search",
        get(move |Query(q): Query<HashMap<String, String>>| async move {
            hits.hit();
            seen.lock().unwrap().push(q);
            Json(json!({
                "results": [{"name": "Paris", "latitude": 48.85341, "longitude": 2.3488}]
            }))
        }),
    )
}

fn lookup(base: &str) -> WeatherLookup {
    WeatherLookup::new(
        http_client(),
        format!("{base}/v1/search"),
        format!("{base}/v1/forecast"),
    )
}

#[tokio::test]
async fn resolves_city_then_reports_current_weather() {
    let geo_hits = Hits::default();
    let forecast_hits = Hits::default();
    let geo_seen = Seen::default();
    let forecast_seen = Seen::default();

    let fh = forecast_hits.clone();
    let fs = forecast_seen.clone();
    let router = paris_geocoder(geo_hits.clone(), geo_seen.clone()).route(
        "/v1/forecast",
        get(move |Query(q): Query<HashMap<String, String>>| async move {
            fh.hit();
            fs.lock().unwrap().push(q);
            Json(json!({"current_weather": {"temperature": 18.5, "weathercode": 2}}))
        }),
    );
    let base = serve(router).await;

    let out = lookup(&base).lookup("paris").await;
    assert_eq!(
        out.text,
        "The current weather in Paris is: Partly cloudy with a temperature of 18.5°C."
    );
    assert!(!out.is_failure());
    assert_eq!((geo_hits.count(), forecast_hits.count()), (1, 1));

    let geo_query = geo_seen.lock().unwrap()[0].clone();
    assert_eq!(geo_query["name"], "paris");
    assert_eq!(geo_query["count"], "1");

    let forecast_query = forecast_seen.lock().unwrap()[0].clone();
    assert_eq!(forecast_query["latitude"], "48.85341");
    assert_eq!(forecast_query["longitude"], "2.3488");
    assert_eq!(forecast_query["current_weather"], "true");
    assert_eq!(forecast_query["temperature_unit"], "celsius");
    assert_eq!(forecast_query["timezone"], "auto");
}

#[tokio::test]
async fn city_names_are_query_encoded() {
    let geo_seen = Seen::default();
    let router = paris_geocoder(Hits::default(), geo_seen.clone()).route(
        "/v1/forecast",
        get(|| async { Json(json!({"current_weather": {"temperature": 1.0, "weathercode": 0}})) }),
    );
    let base = serve(router).await;

    lookup(&base).lookup("São Paulo & more").await;
    assert_eq!(geo_seen.lock().unwrap()[0]["name"], "São Paulo & more");
}

#[tokio::test]
async fn unknown_city_makes_no_forecast_call() {
    let forecast_hits = Hits::default();
    let fh = forecast_hits.clone();
    let router = Router::new()
        .route("/v1/search", get(|| async { Json(json!({"results": []})) }))
        .route(
            "/v1/forecast",
            get(move || async move {
                fh.hit();
                Json(json!({}))
            }),
        );
    let base = serve(router).await;

    let out = lookup(&base).lookup("Atlantis").await;
    assert_eq!(out.text, "Could not find location coordinates for Atlantis.");
    assert_eq!(out.failure_kind(), Some(FailureKind::Resolution));
    assert_eq!(forecast_hits.count(), 0);
}

#[tokio::test]
async fn forecast_outage_names_the_forecast_stage() {
    let router = paris_geocoder(Hits::default(), Seen::default()).route(
        "/v1/forecast",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = serve(router).await;

    let out = lookup(&base).lookup("Paris").await;
    assert!(
        out.text.starts_with("Error fetching weather data for Paris: HTTP 500"),
        "{}",
        out.text
    );
    assert_eq!(out.failure_kind(), Some(FailureKind::Transport));
}

#[tokio::test]
async fn forecast_shape_change_is_a_parse_failure() {
    let router = paris_geocoder(Hits::default(), Seen::default()).route(
        "/v1/forecast",
        get(|| async { Json(json!({"current": {"temperature_2m": 12.0}})) }),
    );
    let base = serve(router).await;

    let out = lookup(&base).lookup("Paris").await;
    assert_eq!(
        out.text,
        "Could not parse weather data for Paris. The API response might have changed."
    );
    assert_eq!(out.failure_kind(), Some(FailureKind::Parse));
}

#[tokio::test]
async fn unreachable_geocoder_names_the_geocoding_stage() {
    let base = closed_port().await;

    let out = lookup(&base).lookup("Paris").await;
    assert!(out.text.starts_with("Error finding location for Paris: "), "{}", out.text);
    assert_eq!(out.failure_kind(), Some(FailureKind::Transport));
}

#[tokio::test]
async fn executes_through_the_tool_trait() {
    let router = paris_geocoder(Hits::default(), Seen::default()).route(
        "/v1/forecast",
        get(|| async { Json(json!({"current_weather": {"temperature": -3.0, "weathercode": 73}})) }),
    );
    let base = serve(router).await;

    let tool = lookup(&base);
    assert_eq!(tool.name(), "get_weather_info");
    let out = tool.execute(r#"{"city": "Paris"}"#).await;
    assert_eq!(
        out.text,
        "The current weather in Paris is: Moderate snow fall with a temperature of -3°C."
    );

    let bad = tool.execute(r#"{"town": "Paris"}"#).await;
    assert_eq!(bad.failure_kind(), Some(FailureKind::InvalidArguments));
}
