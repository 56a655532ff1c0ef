//! Document store
//!
//! All state lives behind a single lock so the map and the current pointer can
//! never be observed out of step with each other.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::types::Document;

/// Shared, cloneable handle to the in-memory document store
#[derive(Clone, Default)]
pub struct DocumentStore {
    inner: Arc<RwLock<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    entries: HashMap<String, StoredEntry>,
    /// Always references a key of `entries` when set
    current: Option<String>,
    /// Monotonic insertion counter, used to find the newest remaining entry
    next_seq: u64,
}

struct StoredEntry {
    seq: u64,
    document: Arc<Document>,
}

impl DocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new document and make it the current one
    ///
    /// Input is assumed to be validated already.
    pub async fn store(
        &self,
        filename: impl Into<String>,
        content: impl Into<String>,
        page_count: usize,
    ) -> Arc<Document> {
        let id = Uuid::new_v4().to_string();
        let document = Arc::new(Document::new(
            id.clone(),
            filename.into(),
            content.into(),
            page_count,
        ));

        let mut inner = self.inner.write().await;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.entries.insert(
            id.clone(),
            StoredEntry {
                seq,
                document: document.clone(),
            },
        );
        inner.current = Some(id);

        tracing::debug!(
            document_id = %document.id,
            filename = %document.filename,
            character_count = document.character_count,
            "Stored document"
        );

        document
    }

    /// Look up a document by identifier
    pub async fn get(&self, id: &str) -> Option<Arc<Document>> {
        let inner = self.inner.read().await;
        inner.entries.get(id).map(|entry| entry.document.clone())
    }

    /// The most recently stored document, if any
    pub async fn get_current(&self) -> Option<Arc<Document>> {
        let inner = self.inner.read().await;
        inner
            .current
            .as_ref()
            .and_then(|id| inner.entries.get(id))
            .map(|entry| entry.document.clone())
    }

    /// Remove a document
    ///
    /// Removing the current document repoints `current` at the newest remaining
    /// entry. Returns whether anything was removed.
    pub async fn delete(&self, id: &str) -> bool {
        let mut inner = self.inner.write().await;
        if inner.entries.remove(id).is_none() {
            return false;
        }

        if inner.current.as_deref() == Some(id) {
            inner.current = inner
                .entries
                .iter()
                .max_by_key(|(_, entry)| entry.seq)
                .map(|(key, _)| key.clone());
        }

        tracing::debug!(document_id = %id, "Deleted document");
        true
    }

    /// Remove every document and unset the current pointer
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.entries.clear();
        inner.current = None;
    }

    pub async fn has_documents(&self) -> bool {
        !self.inner.read().await.entries.is_empty()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }
}
