//! OpenAI Gateway for LLM interactions.
//!
//! This module provides a gateway for OpenAI's chat completions API with tool calling.

use crate::error::{Result, WatchLogError};
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::gateways::openai_messages_adapter::{adapt_messages_to_openai, convert_tool_calls};
use crate::llm::models::{LlmGatewayResponse, LlmMessage};
use crate::llm::tools::LlmTool;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

/// Configuration for connecting to OpenAI API.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: String,
}

/// Gateway for OpenAI LLM service.
pub struct OpenAIGateway {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIGateway {
    /// Create a new OpenAI gateway with custom configuration.
    pub fn with_config(config: OpenAIConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Create gateway with custom API key and base URL.
    pub fn with_api_key_and_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self::with_config(OpenAIConfig {
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    fn build_body(
        &self,
        model: &str,
        messages: &[LlmMessage],
        tools: Option<&[Box<dyn LlmTool>]>,
        config: &CompletionConfig,
    ) -> Result<Value> {
        let mut body = serde_json::json!({
            "model": model,
            "messages": adapt_messages_to_openai(messages),
        });

        if let Some(temperature) = config.temperature {
            body["temperature"] = serde_json::json!(temperature);
        }
        if let Some(max_tokens) = config.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        if let Some(tools) = tools {
            if !tools.is_empty() {
                let tool_defs: Vec<_> = tools.iter().map(|t| t.descriptor()).collect();
                body["tools"] = serde_json::to_value(tool_defs)?;
            }
        }

        Ok(body)
    }
}

#[async_trait]
impl LlmGateway for OpenAIGateway {
    async fn complete(
        &self,
        model: &str,
        messages: &[LlmMessage],
        tools: Option<&[Box<dyn LlmTool>]>,
        config: &CompletionConfig,
    ) -> Result<LlmGatewayResponse> {
        info!("Delegating to OpenAI for completion");
        debug!("Model: {}, Message count: {}", model, messages.len());

        let body = self.build_body(model, messages, tools, config)?;

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(WatchLogError::GatewayError(format!(
                "OpenAI API error: {} - {}",
                status, error_text
            )));
        }

        let response_body: Value = response.json().await?;
        debug!(response = %response_body, "Response received");

        let message = &response_body["choices"][0]["message"];
        if message.is_null() {
            return Err(WatchLogError::GatewayError("No choices in response".to_string()));
        }

        let content = message["content"].as_str().map(String::from);

        let tool_calls = if let Some(calls) = message["tool_calls"].as_array() {
            convert_tool_calls(calls)
        } else {
            vec![]
        };

        Ok(LlmGatewayResponse {
            content,
            tool_calls,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::tools::ShowInfoTool;
    use crate::tvdb::ShowInfoResolver;

    fn tools() -> Vec<Box<dyn LlmTool>> {
        vec![Box::new(ShowInfoTool::new(ShowInfoResolver::with_token_and_base_url(
            "t",
            "http://127.0.0.1:1",
        )))]
    }

    #[test]
    fn test_gateway_with_api_key_and_base_url() {
        let gateway = OpenAIGateway::with_api_key_and_base_url("key", "https://custom.com");
        assert_eq!(gateway.config.api_key, "key");
        assert_eq!(gateway.config.base_url, "https://custom.com");
    }

    #[test]
    fn test_build_body_with_tools() {
        let gateway = OpenAIGateway::with_api_key_and_base_url("key", "https://custom.com");
        let tools = tools();
        let messages = vec![LlmMessage::user("Hi")];

        let body = gateway
            .build_body("gpt-4", &messages, Some(tools.as_slice()), &CompletionConfig::default())
            .unwrap();

        assert_eq!(body["model"], "gpt-4");
        assert_eq!(body["messages"][0]["content"], "Hi");
        assert_eq!(body["tools"][0]["type"], "function");
        assert_eq!(body["tools"][0]["function"]["name"], "get_show_info");
        assert!(body.get("temperature").is_none());
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn test_build_body_with_config() {
        let gateway = OpenAIGateway::with_api_key_and_base_url("key", "https://custom.com");
        let config = CompletionConfig {
            temperature: Some(0.5),
            max_tokens: Some(256),
        };

        let body = gateway.build_body("gpt-4", &[], None, &config).unwrap();

        assert_eq!(body["temperature"], 0.5);
        assert_eq!(body["max_tokens"], 256);
        assert!(body.get("tools").is_none());
    }

    #[tokio::test]
    async fn test_complete_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Hello!"}}]}"#)
            .create_async()
            .await;

        let gateway = OpenAIGateway::with_api_key_and_base_url("test-key", server.url());
        let messages = vec![LlmMessage::user("Hi")];

        let result = gateway.complete("gpt-4", &messages, None, &CompletionConfig::default()).await;

        mock.assert_async().await;
        let response = result.unwrap();
        assert_eq!(response.content, Some("Hello!".to_string()));
        assert!(response.tool_calls.is_empty());
    }

    #[tokio::test]
    async fn test_complete_with_tool_calls() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(mockito::Matcher::PartialJsonString(r#"{"model":"gpt-4"}"#.to_string()))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":null,"tool_calls":[{"id":"call_1","type":"function","function":{"name":"get_show_info","arguments":"{\"query_string\": \"The Office\"}"}}]}}]}"#)
            .create_async()
            .await;

        let gateway = OpenAIGateway::with_api_key_and_base_url("test-key", server.url());
        let messages = vec![LlmMessage::user("I watched the office")];
        let tools = tools();

        let result =
            gateway.complete("gpt-4", &messages, Some(tools.as_slice()), &CompletionConfig::default()).await;

        mock.assert_async().await;
        let response = result.unwrap();
        assert!(response.content.is_none());
        assert_eq!(response.tool_calls.len(), 1);
        assert_eq!(response.tool_calls[0].name, "get_show_info");
        assert_eq!(response.tool_calls[0].arguments, r#"{"query_string": "The Office"}"#);
    }

    #[tokio::test]
    async fn test_complete_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body("Unauthorized")
            .create_async()
            .await;

        let gateway = OpenAIGateway::with_api_key_and_base_url("bad-key", server.url());
        let messages = vec![LlmMessage::user("Hi")];

        let result = gateway.complete("gpt-4", &messages, None, &CompletionConfig::default()).await;

        mock.assert_async().await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_complete_without_choices() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let gateway = OpenAIGateway::with_api_key_and_base_url("test-key", server.url());

        let result = gateway.complete("gpt-4", &[], None, &CompletionConfig::default()).await;

        mock.assert_async().await;
        assert!(matches!(result, Err(WatchLogError::GatewayError(_))));
    }
}
