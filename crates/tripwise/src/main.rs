//! Plan a trip from the terminal.
//!
//! Reads `OPENROUTER_KEY` (chat model) and `RAPIDAPI_KEY` (hotel search) from
//! the environment.
//!
//! # Examples
//!
//! ```sh
//! # Structured one-shot request
//! tripwise --destination Paris --budget 1500 --days 5
//!
//! # Same, without a model: the tools are called directly
//! tripwise --destination Paris --budget 1500 --days 5 --no-llm
//!
//! # Free-form one-shot request
//! tripwise --prompt "Tokyo for a week, about 2000 dollars"
//!
//! # Interactive session ("exit" quits)
//! tripwise
//! ```

use std::io::Write;
use std::process;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tripwise::prelude::*;

/// Travel-budget planner: hotels, daily spend, and weather for a trip.
#[derive(Parser)]
#[command(name = "tripwise")]
struct Cli {
    /// Free-form query (one-shot mode).
    #[arg(long, conflicts_with = "destination")]
    prompt: Option<String>,

    /// Destination city (structured one-shot mode).
    #[arg(long, requires_all = ["budget", "days"])]
    destination: Option<String>,

    /// Total trip budget in USD.
    #[arg(long, requires = "destination")]
    budget: Option<u32>,

    /// Trip length in days.
    #[arg(long, requires = "destination")]
    days: Option<u32>,

    /// Skip the model and call the tools directly (structured mode only).
    #[arg(long)]
    no_llm: bool,

    /// Model to use for completions. Overrides TRIPWISE_MODEL.
    #[arg(long)]
    model: Option<String>,

    /// Maximum agentic round-trips.
    #[arg(long, default_value_t = 10)]
    max_rounds: u32,

    /// Sampling temperature.
    #[arg(long, default_value_t = 0.0)]
    temperature: f32,
}

impl Cli {
    fn config(&self) -> TripConfig {
        let mut config = TripConfig::from_env();
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        config.max_rounds = self.max_rounds;
        config.temperature = self.temperature;
        config
    }

    fn trip_request(&self) -> Option<Result<TripRequest, TripRequestError>> {
        let destination = self.destination.as_deref()?;
        Some(TripRequest::new(
            destination,
            self.budget.unwrap_or_default(),
            self.days.unwrap_or_default(),
        ))
    }
}

const NEEDS_LLM: &str = "free-form queries need a model; use --destination, --budget and --days with --no-llm";

async fn run(cli: Cli) -> Result<(), PlannerError> {
    let config = cli.config();

    if let Some(request) = cli.trip_request() {
        let request = request?;
        let planner: Box<dyn TripPlanner> = if cli.no_llm {
            Box::new(DirectPlanner::from_config(&config)?)
        } else {
            Box::new(AgentPlanner::from_config(&config)?)
        };
        println!("{}", planner.plan(&request).await?);
        return Ok(());
    }

    if cli.no_llm {
        return Err(PlannerError::Unsupported(NEEDS_LLM));
    }
    let planner = AgentPlanner::from_config(&config)?;

    if let Some(prompt) = &cli.prompt {
        println!("{}", planner.answer(prompt).await?);
        return Ok(());
    }

    interactive(&planner).await
}

/// Read queries line by line until `exit` or end of input.
async fn interactive(planner: &AgentPlanner) -> Result<(), PlannerError> {
    println!("--- Travel Budget Planner ---");
    println!("Type 'exit' to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("You: ");
        let _ = std::io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("Error: failed to read input: {e}");
                break;
            }
        };
        let query = line.trim();
        if query.eq_ignore_ascii_case("exit") {
            break;
        }
        if query.is_empty() {
            continue;
        }

        match planner.answer(query).await {
            Ok(plan) => println!("\nAgent: {plan}\n"),
            Err(e) => eprintln!("\nError: {e}\n"),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
