//! REST endpoint handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tripwise::agent::planner::TripPlanner;
use tripwise::trip::TripRequest;

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<dyn TripPlanner>,
}

/// Body of a successful `POST /plan-trip`.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResponse {
    pub plan: String,
}

/// Body of every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

/// `POST /plan-trip`: generate a travel plan.
///
/// 422 for a malformed or invalid request, 502 when the planner fails.
pub async fn plan_trip(
    State(app): State<AppState>,
    body: Result<Json<TripRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text());
        }
    };

    info!(
        "POST /plan-trip: {} ({} days, ${})",
        request.destination, request.duration_days, request.total_budget
    );

    match app.planner.plan(&request).await {
        Ok(plan) => (StatusCode::OK, Json(PlanResponse { plan })).into_response(),
        Err(e) if e.is_client_error() => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        }
        Err(e) => {
            warn!("planning failed: {e}");
            error_response(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

/// `GET /health`: liveness check.
pub async fn health() -> &'static str {
    "ok"
}
