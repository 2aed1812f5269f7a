//! The interactive conversation loop.
//!
//! Each line of input is one turn: the line goes to the model with the full history and the
//! show lookup tool, a tool call (if any) is answered and sent back for a follow-up reply,
//! and the final reply is handed to the viewing-log pipeline. Failures end the turn, never
//! the loop.

use crate::error::{Result, WatchLogError};
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::models::{LlmGatewayResponse, LlmMessage, LlmToolCall};
use crate::llm::tools::LlmTool;
use crate::viewlog::{self, CsvSink};
use std::fmt;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const SYSTEM_PROMPT: &str = include_str!("prompt.txt");

/// Input lines that end the conversation. Matched exactly.
pub const EXIT_COMMANDS: [&str; 4] = ["exit", "quit", "q", "bye"];

pub fn is_exit_command(line: &str) -> bool {
    EXIT_COMMANDS.contains(&line)
}

/// Conversation history, starting with the system prompt.
#[derive(Debug, Clone)]
pub struct ConversationState {
    messages: Vec<LlmMessage>,
}

impl ConversationState {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![LlmMessage::system(system_prompt)],
        }
    }

    pub fn messages(&self) -> &[LlmMessage] {
        &self.messages
    }

    pub fn push(&mut self, message: LlmMessage) {
        self.messages.push(message);
    }

}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new(SYSTEM_PROMPT)
    }
}

/// How a single turn ended
#[derive(Debug)]
pub enum TurnOutcome {
    /// Rows were appended to the log
    Logged { count: usize, path: String },
    /// The reply was an empty batch
    NothingToLog,
    /// The reply could not be extracted or written
    NotLogged { error: WatchLogError, response: String },
    /// A chat completion failed
    ChatFailed(WatchLogError),
    /// The tool call could not be carried out
    ToolFailed(WatchLogError),
}

impl fmt::Display for TurnOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnOutcome::Logged { count, path } => write!(f, "Logged {} entries to {}", count, path),
            TurnOutcome::NothingToLog => write!(f, "Nothing to log"),
            TurnOutcome::NotLogged { error, response } => {
                write!(f, "Could not log response: {}\n{}", error, response)
            }
            TurnOutcome::ChatFailed(e) => write!(f, "ChatCompletion error: {}", e),
            TurnOutcome::ToolFailed(e) => write!(f, "Tool call error: {}", e),
        }
    }
}

/// Drives turns against the model and records the results.
pub struct WatchLogAssistant {
    gateway: Arc<dyn LlmGateway>,
    tools: Vec<Box<dyn LlmTool>>,
    sink: CsvSink,
    model: String,
    follow_up_model: String,
    config: CompletionConfig,
}

impl WatchLogAssistant {
    pub fn new(gateway: Arc<dyn LlmGateway>, tools: Vec<Box<dyn LlmTool>>, sink: CsvSink) -> Self {
        Self {
            gateway,
            tools,
            sink,
            model: crate::config::DEFAULT_MODEL.to_string(),
            follow_up_model: crate::config::DEFAULT_FOLLOW_UP_MODEL.to_string(),
            config: CompletionConfig::default(),
        }
    }

    /// Set the models for the first and the follow-up completion of a turn.
    pub fn with_models(mut self, model: impl Into<String>, follow_up_model: impl Into<String>) -> Self {
        self.model = model.into();
        self.follow_up_model = follow_up_model.into();
        self
    }

    /// Set the sampling settings sent with every completion.
    pub fn with_completion_config(mut self, config: CompletionConfig) -> Self {
        self.config = config;
        self
    }

    async fn complete(&self, model: &str, state: &ConversationState) -> Result<LlmGatewayResponse> {
        self.gateway.complete(model, state.messages(), Some(self.tools.as_slice()), &self.config).await
    }

    /// Process one line of user input.
    ///
    /// Every reply received from the model is appended to `state`, including the tool-call
    /// reply of a turn that is later aborted.
    pub async fn handle_turn(&self, state: &mut ConversationState, input: &str) -> TurnOutcome {
        state.push(LlmMessage::user(input));

        let response = match self.complete(&self.model, state).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Chat completion failed");
                return TurnOutcome::ChatFailed(e);
            }
        };
        state.push(response.to_message());

        let response = match response.first_tool_call().cloned() {
            Some(call) => {
                if response.tool_calls.len() > 1 {
                    debug!(ignored = response.tool_calls.len() - 1, "Ignoring additional tool calls");
                }
                match self.answer_tool_call(state, &call).await {
                    Ok(follow_up) => follow_up,
                    Err(outcome) => return outcome,
                }
            }
            None => response,
        };

        let text = response.content.unwrap_or_default();
        match viewlog::process_message(&self.sink, &text) {
            Ok(0) => TurnOutcome::NothingToLog,
            Ok(count) => TurnOutcome::Logged {
                count,
                path: self.sink.path().display().to_string(),
            },
            Err(e) => {
                error!(error = %e, response_text = %text, "Error processing response text");
                TurnOutcome::NotLogged {
                    error: e,
                    response: text,
                }
            }
        }
    }

    /// Run the tool for `call`, record its result, and fetch the model's follow-up reply.
    async fn answer_tool_call(
        &self,
        state: &mut ConversationState,
        call: &LlmToolCall,
    ) -> std::result::Result<LlmGatewayResponse, TurnOutcome> {
        info!(tool = %call.name, id = ?call.id, "Tool call");

        let Some(tool) = self.tools.iter().find(|t| t.matches(&call.name)) else {
            warn!(tool = %call.name, "Tool not found");
            return Err(TurnOutcome::ToolFailed(WatchLogError::ToolError(format!(
                "unknown tool: {}",
                call.name
            ))));
        };

        let output = tool.run(&call.arguments).await.map_err(|e| {
            error!(error = %e, "Error running tool call");
            TurnOutcome::ToolFailed(e)
        })?;

        state.push(LlmMessage::tool(output, call.id.clone()));

        let follow_up = self.complete(&self.follow_up_model, state).await.map_err(|e| {
            error!(error = %e, "Error creating follow-up chat completion");
            TurnOutcome::ChatFailed(e)
        })?;
        state.push(follow_up.to_message());

        Ok(follow_up)
    }

    /// Read lines from `input` until an exit command or end of input.
    pub async fn run<R: BufRead, W: Write>(
        &self,
        state: &mut ConversationState,
        input: R,
        output: &mut W,
    ) -> Result<()> {
        writeln!(output, "Conversation")?;
        writeln!(output, "---------------------")?;
        write!(output, "> ")?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            if is_exit_command(&line) {
                info!(command = %line, "Exiting");
                break;
            }

            let outcome = self.handle_turn(state, &line).await;
            writeln!(output, "{}", outcome)?;
            write!(output, "> ")?;
            output.flush()?;
        }

        Ok(())
    }
}
