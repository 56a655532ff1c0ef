//! Answer generator
//!
//! Validates a question, wraps it and the document text in a grounding prompt,
//! and makes exactly one call to the chat backend.

use std::sync::Arc;

use thiserror::Error;

use super::backend::{BackendError, ChatBackend, ChatMessage, ChatRequest, GroqBackend};
use super::prompt::{user_prompt, SYSTEM_PROMPT};
use crate::config::{InferenceConfig, PLACEHOLDER_API_KEY};

/// Longest accepted question, in characters
pub const MAX_QUESTION_CHARS: usize = 1000;

/// Upper bound on completion length
pub const MAX_COMPLETION_TOKENS: u32 = 1024;

/// Low randomness keeps the model close to the supplied text
pub const COMPLETION_TEMPERATURE: f32 = 0.1;

/// Answer generation errors
#[derive(Error, Debug)]
pub enum AnswerError {
    #[error("Document content is empty")]
    EmptyDocument,

    #[error("Question is empty")]
    EmptyQuestion,

    #[error("Question is too long. Maximum {max} characters allowed.")]
    QuestionTooLong { max: usize },

    #[error("inference backend failed: {0}")]
    Upstream(#[from] BackendError),
}

impl AnswerError {
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Upstream(_))
    }
}

/// Question-answering service over a chat backend
#[derive(Clone)]
pub struct AnswerGenerator {
    backend: Arc<dyn ChatBackend>,
    model: String,
    api_key: Option<String>,
}

impl AnswerGenerator {
    /// Build a generator backed by Groq
    ///
    /// No connection is made until the first question is asked.
    pub fn from_config(config: &InferenceConfig) -> Self {
        let backend = GroqBackend::new(
            config.api_key.as_deref().unwrap_or_default(),
            &config.base_url,
        );
        Self {
            backend: Arc::new(backend),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Build a generator around an arbitrary backend
    pub fn with_backend(
        backend: Arc<dyn ChatBackend>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            backend,
            model: model.into(),
            api_key,
        }
    }

    /// True when a real (non-placeholder) credential is configured
    pub fn has_credential(&self) -> bool {
        self.api_key
            .as_deref()
            .map(str::trim)
            .is_some_and(|key| !key.is_empty() && key != PLACEHOLDER_API_KEY)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Answer `question` using only `document`
    pub async fn answer(&self, document: &str, question: &str) -> Result<String, AnswerError> {
        let request = self.build_request(document, question)?;

        tracing::debug!(
            backend = self.backend.name(),
            model = %self.model,
            question_chars = question.chars().count(),
            "Requesting completion"
        );

        let answer = self.backend.complete(&request).await.map_err(|e| {
            tracing::error!(backend = self.backend.name(), "Completion failed: {}", e);
            AnswerError::Upstream(e)
        })?;

        Ok(answer.trim().to_string())
    }

    fn build_request(&self, document: &str, question: &str) -> Result<ChatRequest, AnswerError> {
        if document.trim().is_empty() {
            return Err(AnswerError::EmptyDocument);
        }
        if question.trim().is_empty() {
            return Err(AnswerError::EmptyQuestion);
        }
        if question.chars().count() > MAX_QUESTION_CHARS {
            return Err(AnswerError::QuestionTooLong {
                max: MAX_QUESTION_CHARS,
            });
        }

        Ok(ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(user_prompt(document, question)),
            ],
            max_tokens: MAX_COMPLETION_TOKENS,
            temperature: COMPLETION_TEMPERATURE,
        })
    }
}
