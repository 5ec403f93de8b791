//! Agent harness: the tool-use loop on top of a chat completions endpoint.
//!
//! The [`Harness`] sends messages + tool definitions to the LLM, executes
//! any returned tool calls via the [`ToolSet`], appends results, and repeats
//! until the LLM produces a response without tool calls or the round limit
//! is reached. Callers observe the loop via [`EventHandler`] events.

use super::config::HarnessConfig;
use super::events::{EventHandler, HarnessEvent, HarnessResult};
use crate::tools::core::ToolSet;
use crate::{ChatClient, ChatRequest, Message, MessageRole, PlannerError};
use tracing::{debug, info};

/// The agentic tool-use loop.
///
/// ```ignore
/// let tools = ToolSet::new().with_travel_tools(&http, &endpoints, hotel_key);
/// let config = HarnessConfig::new(DEFAULT_MODEL, travel_system_prompt());
/// let messages = vec![Message::user("Paris, $1500, 5 days")];
///
/// let result = Harness::new(&chat, &tools, config).run(messages).await?;
/// println!("{}", result.text());
/// ```
///
/// # Lifetimes
///
/// `Harness<'a>` borrows the client, tools, and event handler. Bind the
/// handler to a `let` before building the harness so it outlives `.run()`.
pub struct Harness<'a> {
    client: &'a ChatClient,
    tools: &'a ToolSet,
    config: HarnessConfig,
    event_handler: &'a dyn EventHandler,
}

impl<'a> Harness<'a> {
    pub fn new(client: &'a ChatClient, tools: &'a ToolSet, config: HarnessConfig) -> Self {
        Self {
            client,
            tools,
            config,
            event_handler: &super::events::NoopHandler,
        }
    }

    /// Attach an event handler.
    pub fn with_event_handler(mut self, handler: &'a dyn EventHandler) -> Self {
        self.event_handler = handler;
        self
    }

    /// Run the loop.
    ///
    /// Tool calls within a round execute one at a time, in the order the
    /// model listed them. A tool failure is just another tool result; only
    /// chat-endpoint failures end the run with an error.
    pub async fn run(self, messages: Vec<Message>) -> Result<HarnessResult, PlannerError> {
        let mut messages = with_system_prompt(messages, self.config.system_prompt.as_deref());
        let definitions = self.tools.definitions();
        let tool_defs = (!definitions.is_empty()).then_some(definitions);

        let mut result = HarnessResult {
            messages: Vec::new(),
            text_output: Vec::new(),
            final_answer: None,
            total_prompt_tokens: 0,
            total_completion_tokens: 0,
            rounds_used: 0,
            finished: false,
        };

        info!(
            "Starting agent run: model={}, tools={}, max_rounds={}",
            self.config.model,
            self.tools.len(),
            self.config.max_rounds
        );

        for round in 1..=self.config.max_rounds {
            result.rounds_used = round;
            self.emit(&HarnessEvent::RoundStart {
                round,
                max_rounds: self.config.max_rounds,
            });

            let request = ChatRequest {
                model: self.config.model.clone(),
                messages: messages.clone(),
                max_tokens: self.config.max_tokens,
                temperature: self.config.temperature,
                tools: tool_defs.clone(),
            };
            let completion = self.client.chat(&request).await?;

            if let Some(usage) = &completion.usage {
                let prompt_tokens = usage.prompt_tokens.unwrap_or(0);
                let completion_tokens = usage.completion_tokens.unwrap_or(0);
                result.total_prompt_tokens = result.total_prompt_tokens.saturating_add(prompt_tokens);
                result.total_completion_tokens =
                    result.total_completion_tokens.saturating_add(completion_tokens);
                self.emit(&HarnessEvent::TokenUsage {
                    prompt_tokens,
                    completion_tokens,
                });
            }

            let text = completion
                .content
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty());
            if let Some(text) = text {
                self.emit(&HarnessEvent::Text(text));
                result.text_output.push(text.to_string());
            }

            if completion.tool_calls.is_empty() {
                if let Some(text) = text {
                    messages.push(Message::assistant_text(text));
                    result.final_answer = Some(text.to_string());
                }
                result.finished = true;
                self.emit(&HarnessEvent::Finished);
                break;
            }

            self.emit(&HarnessEvent::ToolCallsReceived {
                round,
                count: completion.tool_calls.len(),
            });
            messages.push(Message::assistant_tool_calls(completion.tool_calls.clone()));

            for call in &completion.tool_calls {
                let name = call.function.name.as_str();
                let arguments = call.function.arguments.as_str();
                self.emit(&HarnessEvent::ToolExecuting { name, arguments });

                let output = self.tools.execute(name, arguments).await;
                self.emit(&HarnessEvent::ToolResult {
                    name,
                    call_id: &call.id,
                    result: &output.text,
                    failure: output.failure_kind(),
                });
                messages.push(Message::tool_result(&call.id, output.text));
            }
            debug!("Round {round} complete, {} messages", messages.len());
        }

        if !result.finished {
            self.emit(&HarnessEvent::RoundLimitReached {
                max_rounds: self.config.max_rounds,
            });
        }

        result.messages = messages;
        Ok(result)
    }

    fn emit(&self, event: &HarnessEvent<'_>) {
        self.event_handler.on_event(event);
    }
}

/// Prepend the configured system prompt unless the conversation already
/// starts with a system message.
fn with_system_prompt(mut messages: Vec<Message>, system_prompt: Option<&str>) -> Vec<Message> {
    let has_system = messages
        .first()
        .is_some_and(|m| m.role == MessageRole::System);
    if let Some(prompt) = system_prompt
        && !has_system
    {
        messages.insert(0, Message::system(prompt));
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_is_prepended_once() {
        let messages = with_system_prompt(vec![Message::user("hi")], Some("be brief"));
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::System);

        let again = with_system_prompt(messages, Some("other"));
        assert_eq!(again.len(), 2);
        assert_eq!(again[0].content.as_deref(), Some("be brief"));
    }

    #[test]
    fn no_prompt_leaves_messages_alone() {
        let messages = with_system_prompt(vec![Message::user("hi")], None);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, MessageRole::User);
    }
}
