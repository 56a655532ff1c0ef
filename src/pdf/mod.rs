//! PDF upload validation and text extraction
//!
//! Parsing is delegated to `lopdf`; this module only decides what counts as an
//! acceptable upload and how per-page text is stitched together.

mod extractor;
#[cfg(test)]
pub(crate) mod fixtures;

pub use extractor::{ExtractedText, PdfError, PdfExtractor};
