//! PDF extractor
//!
//! `validate` checks upload metadata before any bytes are parsed; `extract`
//! turns a PDF buffer into page-annotated plain text.

use lopdf::Document as PdfDocument;
use thiserror::Error;

/// PDF validation and extraction errors
#[derive(Error, Debug)]
pub enum PdfError {
    #[error("Invalid file type. Expected PDF, got: {0}")]
    InvalidFileType(String),

    #[error("File too large. Maximum size is {max_mb}MB, got {actual_mb:.2}MB")]
    FileTooLarge { max_mb: u64, actual_mb: f64 },

    #[error("File is empty")]
    EmptyFile,

    #[error("PDF file contains no pages")]
    NoPages,

    #[error("Could not extract text from PDF. The PDF might be scanned/image-based or empty.")]
    NoExtractableText,

    #[error("Failed to parse PDF: {0}")]
    CorruptDocument(String),

    #[error("PDF extraction task failed: {0}")]
    TaskFailed(String),
}

impl PdfError {
    /// Errors caused by the upload itself rather than by the server
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidFileType(_)
                | Self::FileTooLarge { .. }
                | Self::EmptyFile
                | Self::NoPages
                | Self::NoExtractableText
        )
    }
}

/// Text pulled out of a PDF
#[derive(Debug, Clone)]
pub struct ExtractedText {
    /// Trimmed, page-annotated text; never empty
    pub text: String,
    /// Always at least 1
    pub page_count: usize,
}

/// Stateless PDF validation and text extraction service
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Validate upload metadata
    ///
    /// Checks run in order: extension, size limit, emptiness.
    pub fn validate(&self, filename: &str, byte_size: u64, max_size_mb: u64) -> Result<(), PdfError> {
        if !filename.to_lowercase().ends_with(".pdf") {
            let extension = filename
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            return Err(PdfError::InvalidFileType(extension));
        }

        let max_bytes = max_size_mb * 1024 * 1024;
        if byte_size > max_bytes {
            return Err(PdfError::FileTooLarge {
                max_mb: max_size_mb,
                actual_mb: byte_size as f64 / (1024.0 * 1024.0),
            });
        }

        if byte_size == 0 {
            return Err(PdfError::EmptyFile);
        }

        Ok(())
    }

    /// Extract text from every page, in page order
    ///
    /// Each page that yields text is preceded by a `--- Page N ---` marker line.
    pub fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, PdfError> {
        let doc = PdfDocument::load_mem(bytes)
            .map_err(|e| PdfError::CorruptDocument(e.to_string()))?;

        // BTreeMap keyed by 1-based page number, so iteration is in page order
        let pages = doc.get_pages();
        let page_count = pages.len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        let mut text = String::new();
        for (index, page_number) in pages.keys().enumerate() {
            let page_text = match doc.extract_text(&[*page_number]) {
                Ok(page_text) => page_text,
                Err(e) => {
                    tracing::warn!(page = page_number, "Failed to extract page text: {}", e);
                    continue;
                }
            };
            if page_text.trim().is_empty() {
                continue;
            }
            text.push_str(&format!("\n--- Page {} ---\n", index + 1));
            text.push_str(&page_text);
        }

        let text = text.trim();
        if text.is_empty() {
            return Err(PdfError::NoExtractableText);
        }

        tracing::debug!(
            page_count,
            character_count = text.chars().count(),
            "Extracted PDF text"
        );

        Ok(ExtractedText {
            text: text.to_string(),
            page_count,
        })
    }

    /// Run `extract` on the blocking thread pool
    pub async fn extract_blocking(&self, bytes: Vec<u8>) -> Result<ExtractedText, PdfError> {
        let extractor = *self;
        tokio::task::spawn_blocking(move || extractor.extract(&bytes))
            .await
            .map_err(|e| PdfError::TaskFailed(e.to_string()))?
    }
}
