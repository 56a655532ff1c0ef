//! Chat-completion backends
//!
//! Defines the backend trait and the Groq implementation, which speaks the
//! OpenAI-compatible `/chat/completions` wire format.

use std::sync::OnceLock;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chat backend errors
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed response: {0}")]
    InvalidResponse(String),

    #[error("empty completion")]
    EmptyCompletion,
}

/// Role tag of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
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
}

/// A single completion request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Backend trait for chat-completion APIs
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &'static str;

    /// Send one request and return the completion text
    async fn complete(&self, request: &ChatRequest) -> Result<String, BackendError>;
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Groq chat-completion backend
///
/// The HTTP client is built on the first call, so constructing the backend
/// never touches the network.
pub struct GroqBackend {
    client: OnceLock<Client>,
    api_key: String,
    base_url: String,
}

impl GroqBackend {
    pub fn new(api_key: &str, base_url: &str) -> Self {
        Self {
            client: OnceLock::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn client(&self) -> &Client {
        self.client.get_or_init(Client::new)
    }
}

#[async_trait]
impl ChatBackend for GroqBackend {
    fn name(&self) -> &'static str {
        "groq"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String, BackendError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client()
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api { status, body });
        }

        let response: CompletionResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(BackendError::EmptyCompletion)
    }
}
