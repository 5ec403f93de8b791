//! Agent runtime: the [`Harness`] tool-use loop and the planners built on it.
//!
//! - [`harness::Harness`]: the loop. Start here.
//! - [`config::HarnessConfig`]: model, rounds, tokens, system prompt.
//! - [`events`]: [`EventHandler`] and [`HarnessEvent`] for observing the
//!   loop, with [`LoggingHandler`], [`CompositeEventHandler`], and
//!   [`FnEventHandler`].
//! - [`prompt`]: the travel-budget system prompt.
//! - [`planner`]: [`TripPlanner`] with [`AgentPlanner`] and [`DirectPlanner`].

pub mod config;
pub mod events;
pub mod harness;
pub mod planner;
pub mod prompt;

pub use config::HarnessConfig;
pub use events::{
    CompositeEventHandler, EventHandler, FnEventHandler, HarnessEvent, HarnessResult,
    LoggingHandler, NoopHandler,
};
pub use harness::Harness;
pub use planner::{AgentPlanner, DirectPlanner, PlanFuture, TripPlanner};
pub use prompt::travel_system_prompt;
