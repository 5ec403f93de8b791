//! Harness events, event handlers, and the run result.
//!
//! The [`Harness`](super::harness::Harness) reports its progress through
//! [`HarnessEvent`]s. Implement [`EventHandler`] (or wrap a closure in
//! [`FnEventHandler`]) to observe a run; combine several with
//! [`CompositeEventHandler`].

use crate::Message;
use crate::tools::failure::FailureKind;
use tracing::{debug, info, warn};

/// Events emitted by the harness during execution.
#[derive(Debug)]
pub enum HarnessEvent<'a> {
    /// A new round is starting.
    RoundStart { round: u32, max_rounds: u32 },
    /// The LLM returned text (may be alongside tool calls).
    Text(&'a str),
    /// The LLM is requesting tool calls this round.
    ToolCallsReceived { round: u32, count: usize },
    /// A single tool is about to be executed.
    ToolExecuting { name: &'a str, arguments: &'a str },
    /// A single tool finished executing.
    ToolResult {
        name: &'a str,
        call_id: &'a str,
        result: &'a str,
        failure: Option<FailureKind>,
    },
    /// Token usage reported by the API for this round.
    TokenUsage {
        prompt_tokens: u32,
        completion_tokens: u32,
    },
    /// The agent finished (no more tool calls).
    Finished,
    /// The agent hit the round limit without finishing.
    RoundLimitReached { max_rounds: u32 },
}

impl HarnessEvent<'_> {
    /// Total tokens for a `TokenUsage` event, `None` for all others.
    pub fn total_tokens(&self) -> Option<u64> {
        if let HarnessEvent::TokenUsage {
            prompt_tokens,
            completion_tokens,
        } = self
        {
            Some(u64::from(*prompt_tokens) + u64::from(*completion_tokens))
        } else {
            None
        }
    }
}

/// Handler for harness events.
///
/// # Example
///
/// ```ignore
/// struct PrintTools;
///
/// impl EventHandler for PrintTools {
///     fn on_event(&self, event: &HarnessEvent<'_>) {
///         if let HarnessEvent::ToolExecuting { name, .. } = event {
///             eprintln!("calling {name}");
///         }
///     }
/// }
/// ```
pub trait EventHandler: Send + Sync {
    fn on_event(&self, event: &HarnessEvent<'_>) {
        let _ = event;
    }
}

/// A handler that ignores every event.
pub struct NoopHandler;
impl EventHandler for NoopHandler {}

/// An event handler backed by a closure.
///
/// ```ignore
/// let handler = FnEventHandler::new(|event| {
///     if let HarnessEvent::Text(text) = event {
///         println!("{text}");
///     }
/// });
/// ```
pub struct FnEventHandler<F>(F)
where
    F: Fn(&HarnessEvent<'_>) + Send + Sync;

impl<F> FnEventHandler<F>
where
    F: Fn(&HarnessEvent<'_>) + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> EventHandler for FnEventHandler<F>
where
    F: Fn(&HarnessEvent<'_>) + Send + Sync,
{
    fn on_event(&self, event: &HarnessEvent<'_>) {
        (self.0)(event)
    }
}

/// Dispatches every event to each inner handler, in registration order.
///
/// ```ignore
/// let handler = CompositeEventHandler::new()
///     .with(LoggingHandler)
///     .with_if(verbose, progress_printer);
/// ```
pub struct CompositeEventHandler {
    handlers: Vec<Box<dyn EventHandler>>,
}

impl CompositeEventHandler {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn with(mut self, handler: impl EventHandler + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Add a handler only when `condition` holds.
    pub fn with_if(self, condition: bool, handler: impl EventHandler + 'static) -> Self {
        if condition { self.with(handler) } else { self }
    }
}

impl Default for CompositeEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for CompositeEventHandler {
    fn on_event(&self, event: &HarnessEvent<'_>) {
        for handler in &self.handlers {
            handler.on_event(event);
        }
    }
}

/// An event handler that logs events via `tracing`.
pub struct LoggingHandler;

impl EventHandler for LoggingHandler {
    fn on_event(&self, event: &HarnessEvent<'_>) {
        match event {
            HarnessEvent::RoundStart { round, max_rounds } => {
                info!("[round {round}/{max_rounds}]");
            }
            HarnessEvent::Text(text) => {
                let preview: String = text.chars().take(200).collect();
                debug!(
                    "LLM text: {preview}{}",
                    if text.chars().count() > 200 { "..." } else { "" }
                );
            }
            HarnessEvent::ToolCallsReceived { round, count } => {
                debug!("{count} tool call(s) in round {round}");
            }
            HarnessEvent::ToolExecuting { name, .. } => {
                debug!("Executing tool: {name}");
            }
            HarnessEvent::ToolResult {
                name,
                result,
                failure,
                ..
            } => match failure {
                Some(kind) => debug!("Tool {name} failed ({kind}): {} bytes", result.len()),
                None => debug!("Tool {name} result: {} bytes", result.len()),
            },
            HarnessEvent::TokenUsage {
                prompt_tokens,
                completion_tokens,
            } => {
                debug!("Tokens: prompt={prompt_tokens}, completion={completion_tokens}");
            }
            HarnessEvent::Finished => {
                info!("Agent finished (no more tool calls)");
            }
            HarnessEvent::RoundLimitReached { max_rounds } => {
                warn!("Agent hit round limit ({max_rounds})");
            }
        }
    }
}

// ── Run result ─────────────────────────────────────────────────────

/// The result of a complete [`Harness::run()`](super::harness::Harness::run).
#[derive(Debug)]
pub struct HarnessResult {
    /// All messages exchanged during the run (including the initial ones).
    pub messages: Vec<Message>,
    /// Text output from the LLM across all rounds.
    pub text_output: Vec<String>,
    /// The content of the final response, when the run finished with one.
    pub final_answer: Option<String>,
    pub total_prompt_tokens: u32,
    pub total_completion_tokens: u32,
    pub rounds_used: u32,
    /// Whether the agent finished naturally (vs hitting the round limit).
    pub finished: bool,
}

impl HarnessResult {
    /// Concatenated text output from all rounds.
    pub fn text(&self) -> String {
        self.text_output.join("\n\n")
    }

    /// Total tokens (prompt + completion).
    pub fn total_tokens(&self) -> u32 {
        self.total_prompt_tokens
            .saturating_add(self.total_completion_tokens)
    }
}
