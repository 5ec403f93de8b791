//! HTTP surface for the tripwise planner.
//!
//! `tripwise-web` wraps any [`TripPlanner`] in a small axum server:
//!
//! | Method | Path | Body | Response |
//! |--------|------|------|----------|
//! | `POST` | `/plan-trip` | `{"destination", "budget", "duration_days"}` | `200 {"plan"}` |
//! | `GET` | `/health` | | `200 ok` |
//!
//! Invalid requests get `422 {"error"}`; planner failures (model provider
//! down, no final answer) get `502 {"error"}`. Tool failures are not request
//! failures: they show up as text inside the plan.
//!
//! # Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use tripwise::prelude::*;
//! use tripwise_web::{WebConfig, spawn_web};
//!
//! let planner: Arc<dyn TripPlanner> = Arc::new(AgentPlanner::from_config(&TripConfig::from_env())?);
//! let addr = spawn_web(planner, WebConfig::default()).await?;
//! println!("Listening on http://{addr}");
//! ```

mod api;
mod server;

pub use api::{ErrorResponse, PlanResponse};
pub use server::build_router;

use std::net::SocketAddr;
use std::sync::Arc;

use tripwise::agent::planner::TripPlanner;

/// Configuration for the web server.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:8000`.
    pub bind_addr: SocketAddr,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
        }
    }
}

/// Spawn the web server on a Tokio task and return the bound address.
///
/// The server runs until the Tokio runtime shuts down. Bind to port `0` to
/// let the OS pick a free port.
pub async fn spawn_web(
    planner: Arc<dyn TripPlanner>,
    config: WebConfig,
) -> std::io::Result<SocketAddr> {
    let router = server::build_router(planner);
    server::start_server(router, config.bind_addr).await
}
