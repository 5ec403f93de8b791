//! Drive the harness directly and watch the tool calls go by.
//!
//! Registers the three travel tools, asks for a plan, and prints the answer
//! along with round and token counts.
//!
//! # Usage
//!
//! ```bash
//! OPENROUTER_KEY=sk-... RAPIDAPI_KEY=... cargo run --example plan_trip
//! ```

use tripwise::agent::prompt::travel_system_prompt;
use tripwise::prelude::*;

#[tokio::main]
async fn main() -> Result<(), PlannerError> {
    let config = TripConfig::from_env();
    let http = config.build_http_client()?;
    let chat = config.build_chat_client(&http)?;

    let tools = ToolSet::new().with_arg_validation(true).with_travel_tools(
        &http,
        &config.endpoints,
        config.hotel_api_key.clone(),
    );

    let harness_config = HarnessConfig::new(config.model.clone(), travel_system_prompt())
        .with_max_rounds(6);

    let handler = FnEventHandler::new(|event| match event {
        HarnessEvent::ToolExecuting { name, arguments } => println!("-> {name}({arguments})"),
        HarnessEvent::ToolResult {
            name,
            failure: Some(kind),
            ..
        } => println!("<- {name} failed: {kind:?}"),
        _ => {}
    });

    let request = TripRequest::new("Lisbon", 1200, 4)?;
    let result = Harness::new(&chat, &tools, harness_config)
        .with_event_handler(&handler)
        .run(vec![Message::user(request.to_query())])
        .await?;

    println!("\n{}", result.text());
    println!(
        "\n--- {} rounds | {} tokens ---",
        result.rounds_used,
        result.total_tokens()
    );
    Ok(())
}
