//! Configuration for the [`Harness`](super::harness::Harness).
//!
//! ```ignore
//! let config = HarnessConfig::new("openai/gpt-3.5-turbo", travel_system_prompt())
//!     .with_max_rounds(10)
//!     .with_temperature(0.0);
//! ```

/// Configuration for a [`Harness`](super::harness::Harness) run.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Model identifier (e.g. `"openai/gpt-3.5-turbo"`).
    pub model: String,
    /// Maximum LLM round-trips before stopping.
    pub max_rounds: u32,
    /// Maximum tokens per LLM response. `0` leaves it to the provider.
    pub max_tokens: u32,
    /// Sampling temperature. `None` leaves it to the provider.
    pub temperature: Option<f32>,
    /// System prompt prepended to the conversation when the caller's
    /// messages do not already start with one.
    pub system_prompt: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            model: crate::DEFAULT_MODEL.to_string(),
            max_rounds: 10,
            max_tokens: 2048,
            temperature: Some(0.0),
            system_prompt: None,
        }
    }
}

impl HarnessConfig {
    /// Create a config with a model and system prompt.
    pub fn new(model: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_prompt: Some(system_prompt.into()),
            ..Default::default()
        }
    }

    /// Set the maximum number of round-trips.
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Set the maximum tokens per LLM response.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sets_model_and_prompt() {
        let config = HarnessConfig::new("m", "be brief").with_max_rounds(3);
        assert_eq!(config.model, "m");
        assert_eq!(config.system_prompt.as_deref(), Some("be brief"));
        assert_eq!(config.max_rounds, 3);
        assert_eq!(config.temperature, Some(0.0));
    }
}
