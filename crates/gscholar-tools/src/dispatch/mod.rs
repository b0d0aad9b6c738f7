//! Multi-turn tool dispatch loop.
//!
//! Alternates model responses and tool executions until a turn produces no
//! tool request. Native provider tool calls take precedence; for models
//! without native tool calling the free-text action protocol is tried on
//! the response text. Invocation parse failures are fed back into the
//! conversation as failed tool results, never raised.
//!
//! The loop carries an explicit turn budget: a conversation that keeps
//! requesting tools past the budget ends in
//! [`Outcome::TurnBudgetExhausted`] instead of spinning forever.

use serde_json::{Value, json};

use crate::client::SerpApiClient;
use crate::formatters;
use crate::tools::schema::{Dialect, parse_invocation, wrap_result};
use crate::tools::{self, action};

/// Default turn budget for a dispatch session.
pub const DEFAULT_MAX_TURNS: u32 = 10;

/// One model response: final text and/or provider-shaped tool calls.
#[derive(Debug, Clone, Default)]
pub struct ModelTurn {
    /// Assistant text, if any.
    pub text: Option<String>,

    /// Provider-shaped tool call objects, in the dialect the loop was
    /// configured with.
    pub tool_calls: Vec<Value>,
}

impl ModelTurn {
    /// A plain text turn with no tool calls.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self { text: Some(content.into()), tool_calls: Vec::new() }
    }

    /// A turn carrying native tool calls.
    #[must_use]
    pub fn with_tool_calls(calls: Vec<Value>) -> Self {
        Self { text: None, tool_calls: calls }
    }
}

/// Seam for model transports. Implementations own the provider protocol;
/// the loop only sees conversation history in and [`ModelTurn`]s out.
#[async_trait::async_trait]
pub trait ChatModel: Send + Sync {
    /// Send the conversation and get the model's next turn.
    async fn chat(&self, messages: &[Value]) -> anyhow::Result<ModelTurn>;
}

/// Terminal outcome of a dispatch session.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The model produced a turn with no tool request.
    Done {
        /// The model's final text.
        final_text: String,
        /// Model round-trips consumed, including the final one.
        turns_used: u32,
    },

    /// The turn budget ran out while the model was still requesting tools.
    TurnBudgetExhausted {
        /// Model round-trips consumed.
        turns_used: u32,
    },
}

/// Tool dispatch loop for one conversation.
pub struct DispatchLoop<'a> {
    client: &'a SerpApiClient,
    dialect: Dialect,
    max_turns: u32,
}

impl<'a> DispatchLoop<'a> {
    /// Create a loop with the default turn budget.
    #[must_use]
    pub fn new(client: &'a SerpApiClient, dialect: Dialect) -> Self {
        Self { client, dialect, max_turns: DEFAULT_MAX_TURNS }
    }

    /// Override the turn budget.
    #[must_use]
    pub const fn with_max_turns(self, max_turns: u32) -> Self {
        Self { max_turns, ..self }
    }

    /// Run the conversation to completion.
    ///
    /// `messages` is the starting history (system prompt plus user turn,
    /// in the dialect's message shape). Tool requests and their results
    /// are appended to it as the loop progresses.
    ///
    /// # Errors
    ///
    /// Returns error only when the model transport itself fails; tool
    /// failures are converted into results and fed back to the model.
    pub async fn run(
        &self,
        model: &dyn ChatModel,
        messages: &mut Vec<Value>,
    ) -> anyhow::Result<Outcome> {
        for turn in 1..=self.max_turns {
            let response = model.chat(messages).await?;

            if !response.tool_calls.is_empty() {
                tracing::debug!(count = response.tool_calls.len(), "Model requested tools");
                self.handle_native_calls(&response, messages).await;
                continue;
            }

            let text = response.text.unwrap_or_default();

            if let Some(scholar_action) = action::extract_action(&text) {
                tracing::debug!(query = %scholar_action.query, "Model requested free-text search");
                self.handle_free_text_action(scholar_action, &text, messages).await;
                continue;
            }

            // No tool request of either kind: the conversation is done.
            return Ok(Outcome::Done { final_text: text, turns_used: turn });
        }

        tracing::warn!(max_turns = self.max_turns, "Turn budget exhausted");
        Ok(Outcome::TurnBudgetExhausted { turns_used: self.max_turns })
    }

    /// Execute native tool calls and append request + results to history.
    async fn handle_native_calls(&self, response: &ModelTurn, messages: &mut Vec<Value>) {
        // Record the assistant turn that requested the tools. Anthropic
        // turns carry text and tool_use as sibling content blocks, so any
        // accompanying text must be kept alongside the calls.
        match self.dialect {
            Dialect::OpenAi => messages.push(json!({
                "role": "assistant",
                "content": response.text,
                "tool_calls": response.tool_calls,
            })),
            Dialect::Anthropic => {
                let mut blocks = Vec::with_capacity(response.tool_calls.len() + 1);
                if let Some(text) = response.text.as_deref().filter(|t| !t.is_empty()) {
                    blocks.push(json!({"type": "text", "text": text}));
                }
                blocks.extend(response.tool_calls.iter().cloned());
                messages.push(json!({
                    "role": "assistant",
                    "content": blocks,
                }));
            }
        }

        let mut results = Vec::with_capacity(response.tool_calls.len());
        for raw_call in &response.tool_calls {
            let id = raw_call
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();

            let result_text = match parse_invocation(self.dialect, raw_call) {
                Ok(invocation) => {
                    tracing::info!(operation = %invocation.args.operation(), "Executing tool");
                    tools::execute(self.client, &invocation.args).await
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Tool invocation rejected");
                    e.to_user_message()
                }
            };

            results.push(wrap_result(self.dialect, &id, &result_text));
        }

        match self.dialect {
            // OpenAI expects one "tool" role message per result.
            Dialect::OpenAi => messages.extend(results),
            // Anthropic expects all tool_result blocks in one user turn.
            Dialect::Anthropic => messages.push(json!({
                "role": "user",
                "content": results,
            })),
        }
    }

    /// Execute a free-text search action and append request + formatted
    /// results to history. Snippets are truncated in this flow.
    async fn handle_free_text_action(
        &self,
        scholar_action: action::ScholarAction,
        assistant_text: &str,
        messages: &mut Vec<Value>,
    ) {
        let args = scholar_action.into_search_args();
        let result = tools::run_search(self.client, &args).await;
        let formatted = formatters::format_search_for_model(&result);

        messages.push(json!({"role": "assistant", "content": assistant_text}));
        messages.push(json!({
            "role": "user",
            "content": format!(
                "Here are the search results:\n\n{formatted}\nPlease summarize these findings."
            ),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::config::Config;

    /// Scripted model returning queued turns, falling back to plain text.
    struct ScriptedModel {
        turns: Mutex<Vec<ModelTurn>>,
        calls_seen: Mutex<Vec<usize>>,
    }

    impl ScriptedModel {
        fn new(turns: Vec<ModelTurn>) -> Self {
            Self { turns: Mutex::new(turns), calls_seen: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait::async_trait]
    impl ChatModel for ScriptedModel {
        async fn chat(&self, messages: &[Value]) -> anyhow::Result<ModelTurn> {
            self.calls_seen.lock().unwrap().push(messages.len());
            let mut turns = self.turns.lock().unwrap();
            if turns.is_empty() {
                Ok(ModelTurn::text("Done."))
            } else {
                Ok(turns.remove(0))
            }
        }
    }

    fn test_client() -> SerpApiClient {
        // No key: tool executions produce error entities, which is fine
        // for loop-shape tests.
        SerpApiClient::new(Config::new(None)).unwrap()
    }

    #[tokio::test]
    async fn test_no_tool_request_terminates_immediately() {
        let client = test_client();
        let model = ScriptedModel::new(vec![ModelTurn::text("Just an answer.")]);
        let mut messages = vec![json!({"role": "user", "content": "hi"})];

        let outcome = DispatchLoop::new(&client, Dialect::OpenAi)
            .run(&model, &mut messages)
            .await
            .unwrap();

        match outcome {
            Outcome::Done { final_text, turns_used } => {
                assert_eq!(final_text, "Just an answer.");
                assert_eq!(turns_used, 1);
            }
            Outcome::TurnBudgetExhausted { .. } => panic!("should terminate"),
        }
        // No tool traffic appended.
        assert_eq!(messages.len(), 1);
    }

    #[tokio::test]
    async fn test_single_action_block_takes_one_extra_round_trip() {
        let client = test_client();
        let model = ScriptedModel::new(vec![
            ModelTurn::text("```json\n{\"action\": \"search\", \"query\": \"rag\"}\n```"),
            ModelTurn::text("Here is a summary."),
        ]);
        let mut messages = vec![json!({"role": "user", "content": "find rag papers"})];

        let outcome = DispatchLoop::new(&client, Dialect::OpenAi)
            .run(&model, &mut messages)
            .await
            .unwrap();

        match outcome {
            Outcome::Done { final_text, turns_used } => {
                assert_eq!(final_text, "Here is a summary.");
                assert_eq!(turns_used, 2);
            }
            Outcome::TurnBudgetExhausted { .. } => panic!("should terminate"),
        }

        // Action request and results were appended before the second trip.
        assert_eq!(messages.len(), 3);
        let feedback = messages[2]["content"].as_str().unwrap();
        assert!(feedback.starts_with("Here are the search results:"));
    }

    #[tokio::test]
    async fn test_native_tool_call_executes_and_wraps_result() {
        let client = test_client();
        let call = json!({
            "id": "call_1",
            "function": {
                "name": "search_scholar",
                "arguments": r#"{"query": "rag"}"#
            }
        });
        let model = ScriptedModel::new(vec![
            ModelTurn::with_tool_calls(vec![call]),
            ModelTurn::text("Summary."),
        ]);
        let mut messages = vec![json!({"role": "user", "content": "go"})];

        let outcome = DispatchLoop::new(&client, Dialect::OpenAi)
            .run(&model, &mut messages)
            .await
            .unwrap();

        assert!(matches!(outcome, Outcome::Done { turns_used: 2, .. }));
        // user + assistant(tool_calls) + tool result
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1]["role"], "assistant");
        assert_eq!(messages[2]["role"], "tool");
        assert_eq!(messages[2]["tool_call_id"], "call_1");
        // No key configured, so the result entity carries an error.
        assert!(messages[2]["content"].as_str().unwrap().contains("error"));
    }

    #[tokio::test]
    async fn test_unrecognized_tool_fed_back_not_crashed() {
        let client = test_client();
        let call = json!({
            "id": "call_1",
            "function": {"name": "order_pizza", "arguments": "{}"}
        });
        let model = ScriptedModel::new(vec![
            ModelTurn::with_tool_calls(vec![call]),
            ModelTurn::text("Understood, no such tool."),
        ]);
        let mut messages = vec![json!({"role": "user", "content": "go"})];

        let outcome = DispatchLoop::new(&client, Dialect::OpenAi)
            .run(&model, &mut messages)
            .await
            .unwrap();

        assert!(matches!(outcome, Outcome::Done { .. }));
        let result_text = messages[2]["content"].as_str().unwrap();
        assert!(result_text.contains("order_pizza"));
        assert!(result_text.contains("does not exist"));
    }

    #[tokio::test]
    async fn test_anthropic_results_grouped_in_one_user_turn() {
        let client = test_client();
        let calls = vec![
            json!({"type": "tool_use", "id": "toolu_1", "name": "search_author",
                   "input": {"author_name": "Hinton"}}),
            json!({"type": "tool_use", "id": "toolu_2", "name": "get_author_profile",
                   "input": {"author_id": "abc"}}),
        ];
        let model = ScriptedModel::new(vec![
            ModelTurn::with_tool_calls(calls),
            ModelTurn::text("Done."),
        ]);
        let mut messages = vec![json!({"role": "user", "content": "go"})];

        DispatchLoop::new(&client, Dialect::Anthropic)
            .run(&model, &mut messages)
            .await
            .unwrap();

        // user + assistant(tool_use blocks) + one user turn with both results
        assert_eq!(messages.len(), 3);
        let results = messages[2]["content"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["tool_use_id"], "toolu_1");
        assert_eq!(results[1]["tool_use_id"], "toolu_2");
    }

    #[tokio::test]
    async fn test_anthropic_history_keeps_text_beside_tool_use() {
        let client = test_client();
        let turn = ModelTurn {
            text: Some("Let me look that up.".to_string()),
            tool_calls: vec![json!({"type": "tool_use", "id": "toolu_1",
                                    "name": "search_author",
                                    "input": {"author_name": "Hinton"}})],
        };
        let model = ScriptedModel::new(vec![turn, ModelTurn::text("Done.")]);
        let mut messages = vec![json!({"role": "user", "content": "go"})];

        DispatchLoop::new(&client, Dialect::Anthropic)
            .run(&model, &mut messages)
            .await
            .unwrap();

        let blocks = messages[1]["content"].as_array().unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0]["type"], "text");
        assert_eq!(blocks[0]["text"], "Let me look that up.");
        assert_eq!(blocks[1]["type"], "tool_use");
    }

    #[tokio::test]
    async fn test_turn_budget_exhaustion() {
        let client = test_client();
        // Every turn requests another search.
        let turns: Vec<ModelTurn> = (0..20)
            .map(|i| {
                ModelTurn::text(format!(
                    "{{\"action\": \"search\", \"query\": \"loop {i}\"}}"
                ))
            })
            .collect();
        let model = ScriptedModel::new(turns);
        let mut messages = vec![json!({"role": "user", "content": "go"})];

        let outcome = DispatchLoop::new(&client, Dialect::OpenAi)
            .with_max_turns(3)
            .run(&model, &mut messages)
            .await
            .unwrap();

        assert!(matches!(outcome, Outcome::TurnBudgetExhausted { turns_used: 3 }));
    }
}
