//! Document Q&A Server Library
//!
//! Upload a PDF, then ask questions that are answered only from its text by a
//! chat-completion model. The server binary is in main.rs.
//!
//! # Modules
//!
//! - `pdf`: Upload validation and text extraction
//! - `document`: In-memory document store with a "current document" pointer
//! - `answer`: Grounding prompts and the chat-completion backend
//! - `routes`: HTTP endpoints

pub mod answer;
pub mod config;
pub mod document;
pub mod error;
pub mod pdf;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
