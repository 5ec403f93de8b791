//! Planner configuration with sensible defaults.
//!
//! [`TripConfig`] holds every endpoint URL and credential the crate uses and
//! turns them into runtime pieces: the shared HTTP client, the [`ToolSet`],
//! the [`HarnessConfig`], and the [`ChatClient`]. Tools never read the
//! environment themselves; [`TripConfig::from_env`] is the only place that
//! does.

use std::time::Duration;

use crate::agent::config::HarnessConfig;
use crate::agent::prompt::travel_system_prompt;
use crate::tools::TravelToolsExt;
use crate::tools::core::ToolSet;
use crate::{ChatClient, DEFAULT_MODEL, OPENROUTER_URL, PlannerError};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_HOTEL_SEARCH_URL: &str = "https://booking-scraper.p.rapidapi.com/hotels/search";
pub const DEFAULT_HOTEL_API_HOST: &str = "booking-scraper.p.rapidapi.com";

/// Default timeout for each outbound HTTP request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Headroom a tool call gets beyond its own HTTP requests.
pub const TOOL_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

/// Environment variable holding the chat API key.
pub const LLM_KEY_ENV: &str = "OPENROUTER_KEY";
/// Environment variable holding the RapidAPI key.
pub const HOTEL_KEY_ENV: &str = "RAPIDAPI_KEY";
/// Environment variable overriding the model.
pub const MODEL_ENV: &str = "TRIPWISE_MODEL";

/// External service endpoints used by the travel tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub geocoding_url: String,
    pub forecast_url: String,
    pub hotel_search_url: String,
    /// Sent as `X-RapidAPI-Host`.
    pub hotel_api_host: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            hotel_search_url: DEFAULT_HOTEL_SEARCH_URL.to_string(),
            hotel_api_host: DEFAULT_HOTEL_API_HOST.to_string(),
        }
    }
}

/// Configuration for a planning session.
#[derive(Clone)]
pub struct TripConfig {
    /// Model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,
    /// Maximum LLM round-trips. Default: `10`.
    pub max_rounds: u32,
    /// Maximum tokens per LLM response. Default: `2048`.
    pub max_tokens: u32,
    /// Sampling temperature. Default: `0.0`.
    pub temperature: f32,
    /// Chat completions endpoint. Default: [`OPENROUTER_URL`].
    pub chat_url: String,
    pub llm_api_key: Option<String>,
    /// RapidAPI key. Without one, `find_hotels` reports itself unavailable.
    pub hotel_api_key: Option<String>,
    pub endpoints: Endpoints,
    /// Timeout for each outbound HTTP request. Default: 15s.
    pub request_timeout: Duration,
    /// Timeout for a whole tool call. Default: two request timeouts plus
    /// [`TOOL_TIMEOUT_MARGIN`], since `get_weather_info` makes two requests
    /// in a row and its own stage-specific errors must fire first.
    pub tool_timeout: Duration,
}

impl std::fmt::Debug for TripConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |k: &Option<String>| k.as_ref().map(|_| "<redacted>");
        f.debug_struct("TripConfig")
            .field("model", &self.model)
            .field("max_rounds", &self.max_rounds)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("chat_url", &self.chat_url)
            .field("llm_api_key", &redact(&self.llm_api_key))
            .field("hotel_api_key", &redact(&self.hotel_api_key))
            .field("endpoints", &self.endpoints)
            .field("request_timeout", &self.request_timeout)
            .field("tool_timeout", &self.tool_timeout)
            .finish()
    }
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_rounds: 10,
            max_tokens: 2048,
            temperature: 0.0,
            chat_url: OPENROUTER_URL.to_string(),
            llm_api_key: None,
            hotel_api_key: None,
            endpoints: Endpoints::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            tool_timeout: tool_timeout_for(DEFAULT_REQUEST_TIMEOUT),
        }
    }
}

/// The tool-call timeout that leaves room for two sequential requests of
/// `request_timeout` each.
pub fn tool_timeout_for(request_timeout: Duration) -> Duration {
    request_timeout.saturating_mul(2).saturating_add(TOOL_TIMEOUT_MARGIN)
}

impl TripConfig {
    /// Defaults, with credentials and model taken from the environment.
    /// Blank values count as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) but reading from an arbitrary
    /// source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self {
            llm_api_key: read(LLM_KEY_ENV),
            hotel_api_key: read(HOTEL_KEY_ENV),
            ..Self::default()
        };
        if let Some(model) = read(MODEL_ENV) {
            config.model = model;
        }
        config
    }

    /// The HTTP client shared by the chat client and every tool.
    pub fn build_http_client(&self) -> Result<reqwest::Client, PlannerError> {
        reqwest::Client::builder()
            .user_agent(concat!("tripwise/", env!("CARGO_PKG_VERSION")))
            .timeout(self.request_timeout)
            .build()
            .map_err(PlannerError::Client)
    }

    /// A [`ToolSet`] with the three travel tools, argument validation, and
    /// the per-tool timeout.
    pub fn build_tool_set(&self, client: &reqwest::Client) -> ToolSet {
        ToolSet::new()
            .with_arg_validation(true)
            .with_default_timeout(Some(self.tool_timeout))
            .with_travel_tools(client, &self.endpoints, self.hotel_api_key.clone())
    }

    /// A [`HarnessConfig`] carrying the travel system prompt.
    pub fn build_harness_config(&self) -> HarnessConfig {
        HarnessConfig::new(self.model.clone(), travel_system_prompt())
            .with_max_rounds(self.max_rounds)
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature)
    }

    /// A [`ChatClient`] for the configured endpoint. Fails when no LLM key
    /// is configured.
    pub fn build_chat_client(&self, client: &reqwest::Client) -> Result<ChatClient, PlannerError> {
        let key = self
            .llm_api_key
            .as_deref()
            .ok_or(PlannerError::MissingCredential(LLM_KEY_ENV))?;
        Ok(ChatClient::new(client.clone(), key, self.chat_url.clone()))
    }
}
