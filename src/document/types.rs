//! Stored document type

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A document whose text has been extracted and stored
///
/// Never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub id: String,
    pub filename: String,
    /// Extracted text, non-empty and already trimmed
    pub content: String,
    pub page_count: usize,
    /// Number of characters (Unicode scalar values) in `content`
    pub character_count: usize,
    pub uploaded_at: DateTime<Utc>,
}

impl Document {
    pub(crate) fn new(id: String, filename: String, content: String, page_count: usize) -> Self {
        let character_count = content.chars().count();
        Self {
            id,
            filename,
            content,
            page_count,
            character_count,
            uploaded_at: Utc::now(),
        }
    }
}
