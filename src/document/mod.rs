//! In-memory document storage
//!
//! Holds extracted document text keyed by a random identifier, plus a single
//! "current document" pointer used implicitly by `/ask`. Nothing is persisted;
//! the store lives exactly as long as the process.

mod store;
mod types;

pub use store::DocumentStore;
pub use types::Document;
