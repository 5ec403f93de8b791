//! Errors for the orchestration layer.
//!
//! Tools never return these: a tool always produces text (see
//! [`ToolOutput`](crate::tools::core::ToolOutput)). `PlannerError` covers the
//! things that can go wrong around the tools, such as the model provider
//! being unreachable or a trip request being invalid, and is surfaced to the
//! caller as a failed request.

use thiserror::Error;

use crate::trip::TripRequestError;

#[derive(Debug, Error)]
pub enum PlannerError {
    /// A required credential was not configured.
    #[error("missing credential: {0} is not set")]
    MissingCredential(&'static str),

    /// The shared HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The chat request could not be sent or its body could not be read.
    #[error("chat request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The chat endpoint answered with a non-success status.
    #[error("chat API HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The chat endpoint answered 2xx but reported an error payload.
    #[error("chat API error: {0}")]
    Provider(String),

    /// The chat response body was not the expected JSON.
    #[error("failed to parse chat response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The agent used all of its rounds without producing a final answer.
    #[error("agent stopped after {rounds} round(s) without a final answer")]
    NoAnswer { rounds: u32 },

    /// The planner cannot handle this kind of request.
    #[error("unsupported request: {0}")]
    Unsupported(&'static str),

    #[error(transparent)]
    InvalidRequest(#[from] TripRequestError),
}

impl PlannerError {
    /// Whether the failure was caused by the caller's input rather than by
    /// the planner or its upstream services.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PlannerError::InvalidRequest(_) | PlannerError::Unsupported(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_request_is_client_error() {
        let err = PlannerError::from(TripRequestError::ZeroDuration);
        assert!(err.is_client_error());
        assert!(err.to_string().contains("duration"));
    }

    #[test]
    fn upstream_failures_are_not_client_errors() {
        let err = PlannerError::Api {
            status: 503,
            body: "overloaded".into(),
        };
        assert!(!err.is_client_error());
        assert_eq!(err.to_string(), "chat API HTTP 503: overloaded");
    }
}
