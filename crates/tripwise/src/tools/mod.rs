//! Tool abstractions and the three travel tools.
//!
//! Every agent capability is a [`Tool`] trait implementor. Tools are
//! collected into a [`ToolSet`] which handles dispatch, validation,
//! truncation, and timeouts.
//!
//! # Submodules
//!
//! - [`core`]: [`Tool`] trait, [`ToolSet`], [`ToolOutput`], [`FnTool`].
//! - [`failure`]: [`ToolFailure`] and [`FailureKind`], the structured side of
//!   a failed tool call.
//! - [`spec`]: [`ToolSpec`](spec::ToolSpec) builder for structured tool
//!   descriptions.
//! - [`weather`], [`hotels`], [`spend`]: the travel tools. Register all three
//!   at once with [`TravelToolsExt::with_travel_tools`].

pub mod core;
pub mod failure;
pub mod hotels;
pub mod spec;
pub mod spend;
pub mod weather;

pub use core::{
    DEFAULT_MAX_RESULT_BYTES, FnTool, Tool, ToolFuture, ToolOutput, ToolSet, parse_tool_args,
    truncate_result, validate_tool_arguments,
};
pub use failure::{FailureKind, ToolFailure};
pub use hotels::HotelSearch;
pub use spend::spend_estimate_tool;
pub use weather::WeatherLookup;

use crate::config::Endpoints;

// ── Tool name constants ─────────────────────────────────────────────

pub const GET_WEATHER_INFO: &str = "get_weather_info";
pub const FIND_HOTELS: &str = "find_hotels";
pub const GET_DAILY_SPEND_ESTIMATE: &str = "get_daily_spend_estimate";

/// All travel tool names, in the order the planning procedure calls them.
pub const TRAVEL_TOOLS: [&str; 3] = [FIND_HOTELS, GET_DAILY_SPEND_ESTIMATE, GET_WEATHER_INFO];

// ── Extension trait ─────────────────────────────────────────────────

/// Extension trait for registering the travel tools on a [`ToolSet`].
///
/// # Example
///
/// ```ignore
/// use tripwise::config::Endpoints;
/// use tripwise::tools::{ToolSet, TravelToolsExt};
///
/// let client = reqwest::Client::new();
/// let tools = ToolSet::new()
///     .with_travel_tools(&client, &Endpoints::default(), std::env::var("RAPIDAPI_KEY").ok());
/// ```
pub trait TravelToolsExt {
    fn with_travel_tools(
        self,
        client: &reqwest::Client,
        endpoints: &Endpoints,
        hotel_api_key: Option<String>,
    ) -> Self;
}

impl TravelToolsExt for ToolSet {
    fn with_travel_tools(
        self,
        client: &reqwest::Client,
        endpoints: &Endpoints,
        hotel_api_key: Option<String>,
    ) -> Self {
        self.with(WeatherLookup::new(
            client.clone(),
            &endpoints.geocoding_url,
            &endpoints.forecast_url,
        ))
        .with(HotelSearch::new(
            client.clone(),
            hotel_api_key,
            &endpoints.hotel_search_url,
            &endpoints.hotel_api_host,
        ))
        .with(spend_estimate_tool())
    }
}
