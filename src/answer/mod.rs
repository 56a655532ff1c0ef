//! Grounded question answering
//!
//! The generator owns prompt construction and input limits; the backend owns
//! the wire protocol of the inference API.

mod backend;
mod generator;
mod prompt;

pub use backend::{BackendError, ChatBackend, ChatMessage, ChatRequest, GroqBackend, Role};
pub use generator::{
    AnswerError, AnswerGenerator, COMPLETION_TEMPERATURE, MAX_COMPLETION_TOKENS,
    MAX_QUESTION_CHARS,
};
pub use prompt::{user_prompt, FALLBACK_ANSWER, SYSTEM_PROMPT};

#[cfg(test)]
pub(crate) use generator::mock;
