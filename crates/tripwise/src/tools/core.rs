//! Tool abstraction for LLM function-calling agents.
//!
//! The [`Tool`] trait defines the interface that every tool must implement:
//! a static API definition (name, description, JSON schema) and an async
//! `execute` method. Tools are collected into a [`ToolSet`] which handles
//! dispatch, definition export, argument validation, timeouts, and result
//! truncation.

use crate::ToolDef;
use crate::tools::failure::{FailureKind, ToolFailure};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Maximum size (in bytes) for tool output before truncation.
pub const DEFAULT_MAX_RESULT_BYTES: usize = 8_000;

/// Default timeout for a single tool execution.
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(30);

/// Boxed future returned by [`Tool::execute`].
pub type ToolFuture<'a> = Pin<Box<dyn Future<Output = ToolOutput> + Send + 'a>>;

// ── ToolOutput ─────────────────────────────────────────────────────

/// The result of one tool call.
///
/// `text` is always present and is what the LLM sees, whether the call
/// succeeded or not. `failure` is attached when the text describes a
/// failure; it exists for logging and for callers that want to branch on
/// the failure kind without parsing strings.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    pub text: String,
    pub failure: Option<ToolFailure>,
}

impl ToolOutput {
    /// A successful result.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            failure: None,
        }
    }

    /// A failed result whose text is the failure's display form.
    pub fn failed(failure: ToolFailure) -> Self {
        Self {
            text: failure.to_string(),
            failure: Some(failure),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure.as_ref().map(ToolFailure::kind)
    }
}

impl From<String> for ToolOutput {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

impl From<ToolFailure> for ToolOutput {
    fn from(failure: ToolFailure) -> Self {
        Self::failed(failure)
    }
}

impl From<Result<String, ToolFailure>> for ToolOutput {
    fn from(result: Result<String, ToolFailure>) -> Self {
        match result {
            Ok(text) => Self::text(text),
            Err(failure) => Self::failed(failure),
        }
    }
}

// ── Tool trait ─────────────────────────────────────────────────────

/// A tool that an LLM agent can invoke via function-calling.
///
/// Implementors provide:
/// - A static definition ([`Tool::definition`]) describing the tool's name,
///   description, and JSON Schema parameters for the LLM.
/// - An async [`Tool::execute`] method that receives the raw JSON arguments
///   string and returns a [`ToolOutput`].
///
/// `execute` must not panic and has no error channel: failures are reported
/// as text the LLM can read, with a [`ToolFailure`] attached for logs.
///
/// Uses a boxed future so that the trait is dyn-compatible (object-safe).
pub trait Tool: Send + Sync {
    /// The tool definition sent to the LLM API.
    fn definition(&self) -> ToolDef;

    /// Execute the tool with the given raw JSON arguments string.
    fn execute(&self, arguments: &str) -> ToolFuture<'_>;

    /// The tool's name, taken from its definition.
    fn name(&self) -> String {
        self.definition().function.name.clone()
    }
}

// ── ToolSet ────────────────────────────────────────────────────────

/// A collection of tools that can be dispatched by name.
///
/// Manages tool registration, definition export (for the LLM API), and
/// dispatch with validation, timing, timeouts, and truncation. Tools are
/// independent: the set holds no per-call state, so one `ToolSet` can serve
/// many concurrent requests behind an `Arc`.
///
/// # Example
///
/// ```ignore
/// let tools = ToolSet::new()
///     .with_arg_validation(true)
///     .with_default_timeout(Some(Duration::from_secs(30)))
///     .with(WeatherLookup::new(client.clone(), endpoints.clone()))
///     .with(spend_estimate_tool());
///
/// // Export definitions for the LLM API.
/// let defs = tools.definitions();
/// ```
pub struct ToolSet {
    tools: HashMap<String, Box<dyn Tool>>,
    max_result_bytes: usize,
    /// Whether to validate tool arguments against JSON Schema before execution.
    validate_args: bool,
    /// Timeout for a single tool execution. `None` disables timeouts.
    default_timeout: Option<Duration>,
}

impl fmt::Debug for ToolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSet")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .field("max_result_bytes", &self.max_result_bytes)
            .field("validate_args", &self.validate_args)
            .field("default_timeout", &self.default_timeout)
            .finish()
    }
}

impl ToolSet {
    /// Create an empty tool set.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            max_result_bytes: DEFAULT_MAX_RESULT_BYTES,
            validate_args: false,
            default_timeout: None,
        }
    }

    /// Set the maximum result size in bytes before truncation.
    pub fn with_max_result_bytes(mut self, max: usize) -> Self {
        self.max_result_bytes = max;
        self
    }

    /// Enable JSON Schema argument validation before tool execution.
    pub fn with_arg_validation(mut self, enabled: bool) -> Self {
        self.validate_args = enabled;
        self
    }

    /// Set a timeout for each tool execution. Pass `None` to disable.
    pub fn with_default_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: impl Tool + 'static) {
        self.tools.insert(tool.name(), Box::new(tool));
    }

    /// Register a tool (builder pattern).
    pub fn with(mut self, tool: impl Tool + 'static) -> Self {
        self.register(tool);
        self
    }

    /// Return all tool definitions for the LLM API, ordered by name.
    pub fn definitions(&self) -> Vec<ToolDef> {
        let mut defs: Vec<ToolDef> = self.tools.values().map(|t| t.definition()).collect();
        defs.sort_by(|a, b| a.function.name.cmp(&b.function.name));
        defs
    }

    /// Whether a tool with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute a tool call by name, with optional validation, timing, and
    /// truncation.
    ///
    /// Never fails: an unknown tool, schema-invalid arguments, or a timeout
    /// each produce a failed [`ToolOutput`] whose text explains the problem.
    pub async fn execute(&self, name: &str, arguments: &str) -> ToolOutput {
        let tool = match self.tools.get(name) {
            Some(t) => t,
            None => {
                let output = ToolOutput::failed(ToolFailure::UnknownTool {
                    name: name.to_string(),
                });
                log_tool_failure(name, &output);
                return output;
            }
        };

        if self.validate_args
            && let Some(failure) = validate_tool_arguments(tool.as_ref(), arguments)
        {
            let output = ToolOutput::failed(failure);
            log_tool_failure(name, &output);
            return output;
        }

        log_tool_call(name, arguments);
        let start = std::time::Instant::now();

        let output = if let Some(timeout_duration) = self.default_timeout {
            match tokio::time::timeout(timeout_duration, tool.execute(arguments)).await {
                Ok(r) => r,
                Err(_) => {
                    info!(
                        "Tool {name} timed out after {:.1}s (limit: {:.0}s)",
                        start.elapsed().as_secs_f64(),
                        timeout_duration.as_secs_f64(),
                    );
                    ToolOutput::failed(ToolFailure::TimedOut {
                        name: name.to_string(),
                        seconds: timeout_duration.as_secs(),
                    })
                }
            }
        } else {
            tool.execute(arguments).await
        };

        debug!(
            "Tool {name} completed in {:.0}ms ({} bytes)",
            start.elapsed().as_secs_f64() * 1000.0,
            output.text.len()
        );
        log_tool_failure(name, &output);
        trace!(
            "Tool {name} result preview: {}",
            output.text.chars().take(300).collect::<String>()
        );

        ToolOutput {
            text: truncate_result(output.text, self.max_result_bytes),
            failure: output.failure,
        }
    }
}

impl Default for ToolSet {
    fn default() -> Self {
        Self::new()
    }
}

// ── FnTool ────────────────────────────────────────────────────────

/// Type-erased async handler for [`FnTool`].
type ErasedToolHandler =
    Box<dyn Fn(String) -> Pin<Box<dyn Future<Output = ToolOutput> + Send>> + Send + Sync>;

/// A closure-based tool that auto-parses arguments and delegates to a handler.
///
/// Use [`FnTool`] for stateless tools. For tools that need shared state
/// (HTTP clients, credentials, endpoints), define a struct and implement the
/// [`Tool`] trait directly.
///
/// # Example
///
/// ```ignore
/// #[derive(Deserialize, JsonSchema)]
/// struct CityArgs {
///     /// City name.
///     city: String,
/// }
///
/// let tool = FnTool::new(
///     ToolDef::new("echo_city", "Echo a city", json_schema_for::<CityArgs>()),
///     |args: CityArgs| async move { args.city },
/// );
/// ```
pub struct FnTool {
    def: ToolDef,
    handler: ErasedToolHandler,
}

impl FnTool {
    /// Create a new closure-based tool.
    ///
    /// The handler receives parsed arguments of type `A` (auto-deserialized
    /// from the raw JSON string). Parse errors become an
    /// [`InvalidArguments`](ToolFailure::InvalidArguments) output.
    pub fn new<A, F, Fut, O>(def: ToolDef, handler: F) -> Self
    where
        A: serde::de::DeserializeOwned + Send + 'static,
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = O> + Send + 'static,
        O: Into<ToolOutput>,
    {
        let erased = move |raw: String| -> Pin<Box<dyn Future<Output = ToolOutput> + Send>> {
            let args: A = match parse_tool_args(&raw) {
                Ok(a) => a,
                Err(failure) => return Box::pin(async move { ToolOutput::failed(failure) }),
            };
            let fut = handler(args);
            Box::pin(async move { fut.await.into() })
        };

        Self {
            def,
            handler: Box::new(erased),
        }
    }
}

impl Tool for FnTool {
    fn definition(&self) -> ToolDef {
        self.def.clone()
    }

    fn execute(&self, arguments: &str) -> ToolFuture<'_> {
        (self.handler)(arguments.to_string())
    }
}

impl fmt::Debug for FnTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTool")
            .field("name", &self.def.function.name)
            .finish()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Validate tool arguments against the tool's declared JSON Schema.
///
/// Returns `None` if valid (or if the schema itself cannot be compiled), or
/// the failure to hand back to the LLM.
pub fn validate_tool_arguments(tool: &dyn Tool, arguments: &str) -> Option<ToolFailure> {
    let args_value: serde_json::Value = match serde_json::from_str(arguments) {
        Ok(v) => v,
        Err(e) => return Some(ToolFailure::InvalidArguments(e.to_string())),
    };

    let schema = tool.definition().function.parameters;
    let validator = match jsonschema::validator_for(&schema) {
        Ok(v) => v,
        Err(_) => return None,
    };

    let errors: Vec<String> = validator
        .iter_errors(&args_value)
        .map(|e| format!("{}: {e}", e.instance_path()))
        .collect();

    if errors.is_empty() {
        None
    } else {
        Some(ToolFailure::InvalidArguments(errors.join("; ")))
    }
}

/// Log a tool call at INFO level with a truncated preview of arguments.
pub fn log_tool_call(name: &str, arguments: &str) {
    let args_preview: String = arguments.chars().take(120).collect();
    info!(
        "[tool] {}({args_preview}{})",
        name,
        if arguments.chars().count() > 120 { "..." } else { "" }
    );
    trace!("[tool] {name} arguments: {arguments}");
}

/// Log the failure metadata of a tool result, if any.
///
/// Empty results are an expected outcome and log at INFO; everything else
/// logs at WARN.
fn log_tool_failure(name: &str, output: &ToolOutput) {
    let Some(failure) = &output.failure else {
        return;
    };
    match failure.kind() {
        FailureKind::EmptyResult => info!(tool = name, kind = %failure.kind(), "{failure}"),
        kind => warn!(tool = name, kind = %kind, "{failure}"),
    }
}

/// Truncate a string to at most `max` bytes (on a char boundary), appending
/// a notice if trimmed.
pub fn truncate_result(mut s: String, max: usize) -> String {
    if s.len() <= max {
        return s;
    }
    let total = s.len();
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    s.truncate(cut);
    format!("{s}...\n[truncated: {total} bytes total]")
}

/// Parse raw JSON arguments into a typed struct.
///
/// # Example
///
/// ```ignore
/// fn execute(&self, arguments: &str) -> ToolFuture<'_> {
///     let parsed = parse_tool_args::<CityArgs>(arguments);
///     Box::pin(async move {
///         let args = match parsed {
///             Ok(a) => a,
///             Err(failure) => return ToolOutput::failed(failure),
///         };
///         // ... use args
///     })
/// }
/// ```
pub fn parse_tool_args<T: serde::de::DeserializeOwned>(arguments: &str) -> Result<T, ToolFailure> {
    serde_json::from_str(arguments).map_err(|e| ToolFailure::InvalidArguments(e.to_string()))
}

// ── Tests ──────────────────────────────────────────────────────────
