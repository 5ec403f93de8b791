//! Convenience re-exports for common `tripwise` types.
//!
//! ```ignore
//! use tripwise::prelude::*;
//! ```
//!
//! Pulls in the chat client and message types, the agent loop and planners,
//! the tool trait and registry, the travel tools, and configuration.

// ── Core types ──────────────────────────────────────────────────────
pub use crate::{ChatClient, ChatRequest, Message, PlannerError, ToolDef, json_schema_for};

// ── Agent runtime ───────────────────────────────────────────────────
pub use crate::agent::{
    AgentPlanner, CompositeEventHandler, DirectPlanner, EventHandler, FnEventHandler, Harness,
    HarnessConfig, HarnessEvent, HarnessResult, LoggingHandler, NoopHandler, TripPlanner,
};

// ── Tools ───────────────────────────────────────────────────────────
pub use crate::tools::spec::ToolSpec;
pub use crate::tools::{
    FailureKind, FnTool, HotelSearch, Tool, ToolFailure, ToolFuture, ToolOutput, ToolSet,
    TravelToolsExt, WeatherLookup, parse_tool_args, spend_estimate_tool,
};

// ── Trips and configuration ─────────────────────────────────────────
pub use crate::config::{Endpoints, TripConfig};
pub use crate::trip::{TripRequest, TripRequestError};
