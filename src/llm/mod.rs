//! LLM chat-completion client
//!
//! Talks to an Ollama-compatible `/api/chat` endpoint. Both the Ollama reply
//! shape (`{"message": {...}}`) and the OpenAI shape
//! (`{"choices": [{"message": {...}}]}`) are accepted.

pub mod extraction;
pub mod prompts;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;

use crate::config::AppConfig;
use crate::ChatMbtiError;
use crate::Result;

pub use extraction::extract_json;

/// Speaker of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    #[default]
    Assistant,
}

/// One message of a chat-completion conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Per-request knobs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChatOptions {
    /// Ask the server for JSON output where it supports it
    pub force_json: bool,
    pub temperature: Option<f32>,
}

impl ChatOptions {
    pub const fn text() -> Self {
        Self {
            force_json: false,
            temperature: None,
        }
    }

    pub const fn json() -> Self {
        Self {
            force_json: true,
            temperature: None,
        }
    }
}

/// Anything that can answer a list of chat messages
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn chat(&self, messages: &[ChatMessage], options: ChatOptions) -> Result<ChatMessage>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'static str>,
}

/// HTTP client for the configured chat endpoint
pub struct LlmService {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
}

impl LlmService {
    /// Create a client from the `[llm]` configuration
    ///
    /// # Errors
    /// - Invalid endpoint URL
    /// - HTTP client build errors
    pub fn new(config: &AppConfig) -> Result<Self> {
        url::Url::parse(config.llm_endpoint()).map_err(|e| {
            ChatMbtiError::ConfigError(format!(
                "invalid LLM endpoint {}: {e}",
                config.llm_endpoint()
            ))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.llm.timeout_secs))
            .build()?;

        let api_key = Some(config.llm_key().trim().to_string()).filter(|k| !k.is_empty());

        info!(
            "LLM client ready: {} (model {})",
            config.llm_endpoint(),
            config.llm_model()
        );

        Ok(Self {
            client,
            endpoint: config.llm_endpoint().trim_end_matches('/').to_string(),
            api_key,
            model: config.llm_model().to_string(),
            temperature: config.llm.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn chat_url(&self) -> String {
        format!("{}/api/chat", self.endpoint)
    }

    /// JSON mode is only requested from local servers
    pub fn is_local(&self) -> bool {
        url::Url::parse(&self.endpoint)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .is_some_and(|host| host == "localhost" || host == "127.0.0.1" || host == "[::1]")
    }

    /// Single-prompt convenience returning the reply text
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let reply = self
            .chat(&[ChatMessage::user(prompt)], ChatOptions::text())
            .await?;
        Ok(reply.content)
    }
}

#[async_trait]
impl ChatBackend for LlmService {
    async fn chat(&self, messages: &[ChatMessage], options: ChatOptions) -> Result<ChatMessage> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            stream: false,
            temperature: options.temperature.unwrap_or(self.temperature),
            format: (options.force_json && self.is_local()).then_some("json"),
        };

        let url = self.chat_url();
        debug!("Calling LLM chat API: {} ({} messages)", url, messages.len());

        let mut builder = self.client.post(&url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {key}"));
        }

        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ChatMbtiError::LlmError(format!(
                "LLM API error ({status}): {error_text}"
            )));
        }

        let body: serde_json::Value = response.json().await?;
        parse_chat_response(body)
    }
}

/// Pull the reply message out of an Ollama- or OpenAI-shaped response body
pub fn parse_chat_response(mut body: serde_json::Value) -> Result<ChatMessage> {
    let message = if let Some(message) = body.get_mut("message") {
        message.take()
    } else if let Some(message) = body
        .get_mut("choices")
        .and_then(|c| c.get_mut(0))
        .and_then(|c| c.get_mut("message"))
    {
        message.take()
    } else {
        return Err(ChatMbtiError::LlmError(
            "Unknown LLM response format".to_string(),
        ));
    };

    Ok(serde_json::from_value(message)?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn service(endpoint: &str, key: &str) -> LlmService {
        let mut config = AppConfig::default();
        config.llm.llm_endpoint = endpoint.to_string();
        config.llm.llm_key = key.to_string();
        LlmService::new(&config).unwrap()
    }

    #[test]
    fn test_parse_ollama_shape() {
        let reply =
            parse_chat_response(json!({"message": {"role": "assistant", "content": "hi"}})).unwrap();
        assert_eq!(reply, ChatMessage::assistant("hi"));
    }

    #[test]
    fn test_parse_openai_shape() {
        let reply = parse_chat_response(json!({
            "choices": [{"message": {"role": "assistant", "content": "{\"a\":1}"}}]
        }))
        .unwrap();
        assert_eq!(reply.content, "{\"a\":1}");
    }

    #[test]
    fn test_parse_unknown_shape() {
        let err = parse_chat_response(json!({"output": "hi"})).unwrap_err();
        assert!(matches!(err, ChatMbtiError::LlmError(msg) if msg.contains("Unknown")));
    }

    #[test]
    fn test_chat_url_and_locality() {
        let local = service("http://localhost:11434/", "");
        assert_eq!(local.chat_url(), "http://localhost:11434/api/chat");
        assert!(local.is_local());
        assert!(local.api_key.is_none());

        let remote = service("https://llm.example.com", "secret");
        assert!(!remote.is_local());
        assert_eq!(remote.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_request_omits_format_unless_set() {
        let messages = [ChatMessage::system("s"), ChatMessage::user("u")];
        let request = ChatRequest {
            model: "m",
            messages: &messages,
            stream: false,
            temperature: 0.2,
            format: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("format").is_none());
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["stream"], false);
    }
}
