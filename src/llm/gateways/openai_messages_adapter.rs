//! Adapter for converting LLM messages to and from OpenAI format.

use crate::llm::models::{LlmMessage, LlmToolCall, MessageRole};
use serde_json::{json, Value};

/// Adapt LLM messages to OpenAI format.
pub fn adapt_messages_to_openai(messages: &[LlmMessage]) -> Vec<Value> {
    messages.iter().map(adapt_message).collect()
}

fn adapt_message(msg: &LlmMessage) -> Value {
    match msg.role {
        MessageRole::System => json!({
            "role": "system",
            "content": msg.content.as_deref().unwrap_or("")
        }),
        MessageRole::User => json!({
            "role": "user",
            "content": msg.content.as_deref().unwrap_or("")
        }),
        MessageRole::Assistant => {
            // content may be null when the reply is only tool calls
            let mut assistant_msg = json!({
                "role": "assistant",
                "content": msg.content
            });

            if let Some(ref tool_calls) = msg.tool_calls {
                let formatted_calls: Vec<Value> = tool_calls
                    .iter()
                    .map(|tc| {
                        json!({
                            "id": tc.id.as_deref().unwrap_or(""),
                            "type": "function",
                            "function": {
                                "name": tc.name,
                                "arguments": tc.arguments
                            }
                        })
                    })
                    .collect();
                assistant_msg["tool_calls"] = json!(formatted_calls);
            }

            assistant_msg
        }
        MessageRole::Tool => json!({
            "role": "tool",
            "content": msg.content.as_deref().unwrap_or(""),
            "tool_call_id": msg.tool_call_id.as_deref().unwrap_or("")
        }),
    }
}

/// Convert tool calls from OpenAI format to internal format.
///
/// Arguments are kept verbatim. Entries without a function name are dropped.
pub fn convert_tool_calls(tool_calls: &[Value]) -> Vec<LlmToolCall> {
    tool_calls
        .iter()
        .filter_map(|tc| {
            let id = tc["id"].as_str().map(String::from);
            let name = tc["function"]["name"].as_str()?.to_string();
            let arguments = match &tc["function"]["arguments"] {
                Value::String(raw) => raw.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };

            Some(LlmToolCall {
                id,
                name,
                arguments,
            })
        })
        .collect()
}
