//! Structured failure detail for tool results.
//!
//! A [`ToolFailure`]'s `Display` output is exactly the text handed back to
//! the LLM, so a tool can build its error message and its log metadata from
//! the same value. [`FailureKind`] groups failures for logging so transport
//! problems are never conflated with shape problems.

use std::fmt;
use thiserror::Error;

/// Coarse classification of a tool failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Bad or missing arguments from the model.
    InvalidArguments,
    /// The input could not be resolved (e.g. unknown city).
    Resolution,
    /// Network, DNS, timeout, or non-success HTTP status.
    Transport,
    /// A response arrived but did not have the expected shape.
    Parse,
    /// A required credential is not configured.
    Configuration,
    /// The call succeeded but found nothing usable.
    EmptyResult,
    /// The registry could not run the tool (unknown name, timeout).
    Dispatch,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::InvalidArguments => "invalid_arguments",
            FailureKind::Resolution => "resolution",
            FailureKind::Transport => "transport",
            FailureKind::Parse => "parse",
            FailureKind::Configuration => "configuration",
            FailureKind::EmptyResult => "empty_result",
            FailureKind::Dispatch => "dispatch",
        };
        f.write_str(s)
    }
}

/// Everything that can go wrong inside a tool call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolFailure {
    #[error(
        "Error: invalid tool arguments: {0}. \
         Please provide valid JSON matching the tool's parameter schema."
    )]
    InvalidArguments(String),

    #[error("Error: unknown tool '{name}'")]
    UnknownTool { name: String },

    #[error(
        "Error: tool '{name}' timed out after {seconds} seconds. \
         Consider trying again with different arguments."
    )]
    TimedOut { name: String, seconds: u64 },

    // ── Weather ──
    #[error("Could not find location coordinates for {city}.")]
    LocationNotFound { city: String },

    #[error("Error finding location for {city}: {reason}")]
    GeocodingTransport { city: String, reason: String },

    #[error(
        "Could not parse location data for {city}. \
         The geocoding response might have changed."
    )]
    GeocodingParse { city: String },

    #[error("Error fetching weather data for {city}: {reason}")]
    ForecastTransport { city: String, reason: String },

    #[error("Could not parse weather data for {city}. The API response might have changed.")]
    ForecastParse { city: String },

    // ── Hotels ──
    #[error("Error: {credential} not found. Hotel search is unavailable.")]
    MissingCredential { credential: &'static str },

    #[error("An HTTP error occurred: {status}. Response body: {body}")]
    HotelHttp { status: String, body: String },

    #[error("Error fetching hotel data: {reason}")]
    HotelTransport { reason: String },

    #[error("No hotels were found in {city} under ${max_price}/night using the specified criteria.")]
    NoHotels { city: String, max_price: i64 },

    #[error("No hotels could be parsed from the API response for {city} under ${max_price}/night.")]
    UnparseableHotels { city: String, max_price: i64 },

    #[error(
        "Could not parse the hotel data for {city} under ${max_price}/night. \
         The API's response format might be different than expected."
    )]
    HotelParse { city: String, max_price: i64 },
}

impl ToolFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            ToolFailure::InvalidArguments(_) => FailureKind::InvalidArguments,
            ToolFailure::UnknownTool { .. } | ToolFailure::TimedOut { .. } => {
                FailureKind::Dispatch
            }
            ToolFailure::LocationNotFound { .. } => FailureKind::Resolution,
            ToolFailure::GeocodingTransport { .. }
            | ToolFailure::ForecastTransport { .. }
            | ToolFailure::HotelHttp { .. }
            | ToolFailure::HotelTransport { .. } => FailureKind::Transport,
            ToolFailure::GeocodingParse { .. }
            | ToolFailure::ForecastParse { .. }
            | ToolFailure::HotelParse { .. } => FailureKind::Parse,
            ToolFailure::MissingCredential { .. } => FailureKind::Configuration,
            ToolFailure::NoHotels { .. } | ToolFailure::UnparseableHotels { .. } => {
                FailureKind::EmptyResult
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_llm_facing_text() {
        let failure = ToolFailure::LocationNotFound {
            city: "Atlantis".into(),
        };
        assert_eq!(
            failure.to_string(),
            "Could not find location coordinates for Atlantis."
        );
        assert_eq!(failure.kind(), FailureKind::Resolution);
    }

    #[test]
    fn empty_and_unparseable_hotels_differ() {
        let empty = ToolFailure::NoHotels {
            city: "Paris".into(),
            max_price: 135,
        };
        let unparseable = ToolFailure::UnparseableHotels {
            city: "Paris".into(),
            max_price: 135,
        };
        assert_ne!(empty.to_string(), unparseable.to_string());
        assert!(empty.to_string().contains("under $135/night"));
        assert_eq!(empty.kind(), unparseable.kind());
    }

    #[test]
    fn transport_and_parse_are_distinct_kinds() {
        let transport = ToolFailure::ForecastTransport {
            city: "Oslo".into(),
            reason: "timed out".into(),
        };
        let parse = ToolFailure::ForecastParse { city: "Oslo".into() };
        assert_eq!(transport.kind(), FailureKind::Transport);
        assert_eq!(parse.kind(), FailureKind::Parse);
        assert_eq!(FailureKind::Parse.to_string(), "parse");
    }
}
