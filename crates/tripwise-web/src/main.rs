//! Serve the travel planner over HTTP.
//!
//! # Usage
//!
//! ```bash
//! OPENROUTER_KEY=sk-... RAPIDAPI_KEY=... cargo run -p tripwise-web
//! OPENROUTER_KEY=sk-... cargo run -p tripwise-web -- --port 8080
//! cargo run -p tripwise-web -- --no-llm
//! ```
//!
//! Then:
//!
//! ```bash
//! curl -s localhost:8000/plan-trip \
//!   -H 'content-type: application/json' \
//!   -d '{"destination":"Paris","budget":1500,"duration_days":5}'
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tripwise::prelude::*;
use tripwise_web::{WebConfig, spawn_web};

/// Travel-budget planner HTTP API.
#[derive(Parser)]
#[command(about = "Travel-budget planner HTTP API")]
struct Args {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: std::net::IpAddr,

    /// Port to listen on.
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Model to use for completions. Overrides TRIPWISE_MODEL.
    #[arg(long)]
    model: Option<String>,

    /// Skip the model and call the tools directly.
    #[arg(long)]
    no_llm: bool,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = TripConfig::from_env();
    if let Some(model) = args.model {
        config.model = model;
    }

    let planner: Arc<dyn TripPlanner> = if args.no_llm {
        Arc::new(DirectPlanner::from_config(&config).map_err(|e| e.to_string())?)
    } else {
        Arc::new(AgentPlanner::from_config(&config).map_err(|e| e.to_string())?)
    };

    let web_config = WebConfig {
        bind_addr: SocketAddr::new(args.host, args.port),
    };
    let addr = spawn_web(planner, web_config)
        .await
        .map_err(|e| format!("failed to bind: {e}"))?;
    println!("tripwise-web: http://{addr}");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("failed to wait for ctrl-c: {e}"))?;
    Ok(())
}
