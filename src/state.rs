//! Application state management

use std::sync::Arc;

use crate::answer::AnswerGenerator;
use crate::config::Config;
use crate::document::DocumentStore;
use crate::error::{ApiError, AppError};
use crate::pdf::PdfExtractor;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    store: DocumentStore,
    extractor: PdfExtractor,
    answers: AnswerGenerator,
}

impl AppState {
    /// Create state with the production Groq backend
    pub fn new(config: Config) -> Self {
        let answers = AnswerGenerator::from_config(&config.inference);
        Self::with_services(config, DocumentStore::new(), answers)
    }

    /// Create state from explicitly constructed services
    pub fn with_services(config: Config, store: DocumentStore, answers: AnswerGenerator) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                extractor: PdfExtractor::new(),
                answers,
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn store(&self) -> &DocumentStore {
        &self.inner.store
    }

    pub fn extractor(&self) -> &PdfExtractor {
        &self.inner.extractor
    }

    pub fn answers(&self) -> &AnswerGenerator {
        &self.inner.answers
    }

    /// Render an error with this server's debug setting
    pub fn reject(&self, error: impl Into<AppError>) -> ApiError {
        error.into().with_debug(self.inner.config.debug)
    }
}
