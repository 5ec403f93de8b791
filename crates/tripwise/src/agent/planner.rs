//! Planning front doors.
//!
//! [`TripPlanner`] is what the CLI and the web server hold. Two
//! implementations:
//!
//! - [`AgentPlanner`] hands the request to the LLM tool-use loop.
//! - [`DirectPlanner`] runs the same procedure without a model: compute the
//!   nightly ceiling, call the three tools in order, and stitch their text
//!   together.

use std::future::Future;
use std::pin::Pin;

use serde_json::json;
use tracing::info;

use super::config::HarnessConfig;
use super::events::LoggingHandler;
use super::harness::Harness;
use crate::config::TripConfig;
use crate::tools::core::ToolSet;
use crate::tools::{FIND_HOTELS, GET_DAILY_SPEND_ESTIMATE, GET_WEATHER_INFO};
use crate::trip::{ACCOMMODATION_SHARE_PERCENT, TripRequest};
use crate::{ChatClient, Message, PlannerError, ToolCall};

/// Boxed future returned by [`TripPlanner::plan`].
pub type PlanFuture<'a> = Pin<Box<dyn Future<Output = Result<String, PlannerError>> + Send + 'a>>;

/// Something that turns a trip request into a written plan.
///
/// Uses a boxed future so planners can live behind `Arc<dyn TripPlanner>`.
pub trait TripPlanner: Send + Sync {
    fn plan<'a>(&'a self, request: &'a TripRequest) -> PlanFuture<'a>;
}

// ── AgentPlanner ───────────────────────────────────────────────────

/// Plans trips by running the LLM tool-use loop.
pub struct AgentPlanner {
    chat: ChatClient,
    tools: ToolSet,
    config: HarnessConfig,
}

impl AgentPlanner {
    pub fn new(chat: ChatClient, tools: ToolSet, config: HarnessConfig) -> Self {
        Self {
            chat,
            tools,
            config,
        }
    }

    /// Build the chat client, tool set, and harness config from `config`.
    pub fn from_config(config: &TripConfig) -> Result<Self, PlannerError> {
        let http = config.build_http_client()?;
        Ok(Self::new(
            config.build_chat_client(&http)?,
            config.build_tool_set(&http),
            config.build_harness_config(),
        ))
    }

    /// Answer a free-form travel query.
    ///
    /// A run that ends without a final text response is an error, never an
    /// empty plan.
    pub async fn answer(&self, query: &str) -> Result<String, PlannerError> {
        let handler = LoggingHandler;
        let result = Harness::new(&self.chat, &self.tools, self.config.clone())
            .with_event_handler(&handler)
            .run(vec![Message::user(query)])
            .await?;

        info!(
            "Agent run finished: rounds={}, tokens={}",
            result.rounds_used,
            result.total_tokens()
        );
        result.final_answer.ok_or(PlannerError::NoAnswer {
            rounds: result.rounds_used,
        })
    }
}

impl TripPlanner for AgentPlanner {
    fn plan<'a>(&'a self, request: &'a TripRequest) -> PlanFuture<'a> {
        Box::pin(async move {
            request.validate()?;
            self.answer(&request.to_query()).await
        })
    }
}

// ── DirectPlanner ──────────────────────────────────────────────────

/// Deterministic planner that needs no model.
///
/// Tool calls go through the [`ToolSet`] exactly as model-issued calls do,
/// so any tool registered under a travel tool name is what gets called.
pub struct DirectPlanner {
    tools: ToolSet,
}

impl DirectPlanner {
    pub fn new(tools: ToolSet) -> Self {
        Self { tools }
    }

    pub fn from_config(config: &TripConfig) -> Result<Self, PlannerError> {
        let http = config.build_http_client()?;
        Ok(Self::new(config.build_tool_set(&http)))
    }

    async fn call(&self, call: ToolCall) -> String {
        self.tools
            .execute(&call.function.name, &call.function.arguments)
            .await
            .text
    }

    async fn build_plan(&self, request: &TripRequest) -> Result<String, PlannerError> {
        request.validate()?;
        let city = request.destination.trim();
        let max_price = request.max_nightly_price();
        info!(
            "Planning {city}: {} days, ${} total, ${max_price}/night ceiling",
            request.duration_days, request.total_budget
        );

        let hotels = self
            .call(ToolCall::function(
                "direct-1",
                FIND_HOTELS,
                &json!({ "city": city, "max_price": max_price }),
            ))
            .await;
        let spend = self
            .call(ToolCall::function(
                "direct-2",
                GET_DAILY_SPEND_ESTIMATE,
                &json!({ "city": city }),
            ))
            .await;
        let weather = self
            .call(ToolCall::function(
                "direct-3",
                GET_WEATHER_INFO,
                &json!({ "city": city }),
            ))
            .await;

        let accommodation_total = u64::from(max_price) * u64::from(request.duration_days);
        Ok(format!(
            "Travel plan for {city}: {days} days on a total budget of ${budget}.\n\n\
             Accommodation: up to ${max_price}/night ({ACCOMMODATION_SHARE_PERCENT}% of the \
             budget, at most ${accommodation_total} for the stay).\n{hotels}\n\n\
             Daily spend: {spend}\n\n\
             Weather: {weather}",
            days = request.duration_days,
            budget = request.total_budget,
        ))
    }
}

impl TripPlanner for DirectPlanner {
    fn plan<'a>(&'a self, request: &'a TripRequest) -> PlanFuture<'a> {
        Box::pin(self.build_plan(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToolDef;
    use crate::tools::core::FnTool;
    use crate::trip::TripRequestError;
    use serde::Deserialize;
    use std::sync::{Arc, Mutex};

    #[derive(Deserialize)]
    struct AnyArgs {
        city: String,
    }

    fn stub(name: &'static str, reply: &'static str) -> FnTool {
        FnTool::new(
            ToolDef::new(name, "stub", json!({"type": "object"})),
            move |args: AnyArgs| async move { format!("{reply} ({})", args.city) },
        )
    }

    #[tokio::test]
    async fn direct_planner_runs_all_three_tools() {
        let planner = DirectPlanner::new(
            ToolSet::new()
                .with(stub(FIND_HOTELS, "hotels"))
                .with(stub(GET_DAILY_SPEND_ESTIMATE, "spend"))
                .with(stub(GET_WEATHER_INFO, "weather")),
        );
        let request = TripRequest::new("Paris", 1500, 5).unwrap();
        let plan = planner.plan(&request).await.unwrap();

        assert!(plan.starts_with("Travel plan for Paris: 5 days on a total budget of $1500."));
        assert!(plan.contains("up to $135/night"));
        assert!(plan.contains("at most $675 for the stay"));
        assert!(plan.contains("hotels (Paris)"));
        assert!(plan.contains("Daily spend: spend (Paris)"));
        assert!(plan.contains("Weather: weather (Paris)"));
    }

    #[tokio::test]
    async fn direct_planner_passes_computed_ceiling() {
        #[derive(Deserialize)]
        struct HotelArgs {
            max_price: i64,
        }

        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();
        let find_hotels = FnTool::new(
            ToolDef::new(FIND_HOTELS, "recorder", json!({"type": "object"})),
            move |args: HotelArgs| {
                recorder.lock().unwrap().push(args.max_price);
                async move { "ok".to_string() }
            },
        );
        let planner = DirectPlanner::new(ToolSet::new().with(find_hotels));

        planner
            .plan(&TripRequest::new("Paris", 1500, 5).unwrap())
            .await
            .unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![135]);
    }

    #[tokio::test]
    async fn missing_tools_degrade_to_text() {
        let planner = DirectPlanner::new(ToolSet::new());
        let plan = planner
            .plan(&TripRequest::new("Lima", 700, 7).unwrap())
            .await
            .unwrap();
        assert!(plan.contains("Error: unknown tool 'find_hotels'"));
        assert!(plan.contains("Error: unknown tool 'get_weather_info'"));
    }

    #[tokio::test]
    async fn invalid_requests_are_rejected_before_any_call() {
        let planner = DirectPlanner::new(ToolSet::new());
        let request = TripRequest {
            destination: "Paris".into(),
            total_budget: 1500,
            duration_days: 0,
        };
        let err = planner.plan(&request).await.unwrap_err();
        assert!(matches!(
            err,
            PlannerError::InvalidRequest(TripRequestError::ZeroDuration)
        ));
        assert!(err.is_client_error());
    }
}
