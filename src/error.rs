//! Error types for the Document Q&A server
//!
//! `AppError` is the only place where a failure kind is turned into an HTTP
//! status and a machine-readable code.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::answer::AnswerError;
use crate::pdf::PdfError;

const NO_DOCUMENT_MESSAGE: &str =
    "No document has been uploaded. Please upload a PDF document first using POST /documents";
const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Bad input from the client
    #[error("{0}")]
    Validation(String),

    #[error("{}", NO_DOCUMENT_MESSAGE)]
    NoDocument,

    /// Server is missing required configuration
    #[error("{0}")]
    Configuration(String),

    /// Inference backend call failed
    #[error("{0}")]
    AiService(String),

    /// Upload could not be processed; the cause is only exposed in debug mode
    #[error("Failed to process document: {0}")]
    Processing(String),

    /// Anything else; the cause is only exposed in debug mode
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::NoDocument => StatusCode::BAD_REQUEST,
            Self::Configuration(_)
            | Self::AiService(_)
            | Self::Processing(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NoDocument => "NO_DOCUMENT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::AiService(_) => "AI_SERVICE_ERROR",
            Self::Processing(_) => "PROCESSING_ERROR",
            Self::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Client-facing message and the internal detail it hides, if any
    fn message_and_detail(&self) -> (String, Option<String>) {
        match self {
            Self::Processing(cause) => ("Failed to process document".to_string(), Some(cause.clone())),
            Self::Internal(cause) => (UNEXPECTED_MESSAGE.to_string(), Some(cause.clone())),
            other => (other.to_string(), None),
        }
    }

    /// Attach the debug flag so the error can be rendered
    pub fn with_debug(self, debug: bool) -> ApiError {
        ApiError { error: self, debug }
    }
}

impl From<PdfError> for AppError {
    fn from(err: PdfError) -> Self {
        if err.is_validation() {
            AppError::Validation(err.to_string())
        } else {
            AppError::Processing(err.to_string())
        }
    }
}

impl From<AnswerError> for AppError {
    fn from(err: AnswerError) -> Self {
        if err.is_validation() {
            AppError::Validation(err.to_string())
        } else {
            AppError::AiService(err.to_string())
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// An `AppError` ready to be turned into a response
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    debug: bool,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        let (message, detail) = self.error.message_and_detail();

        if status.is_server_error() {
            tracing::error!(code = self.error.code(), "{}", self.error);
        } else {
            tracing::debug!(code = self.error.code(), "{}", self.error);
        }

        let body = Json(ErrorResponse {
            success: false,
            error: self.error.code(),
            message,
            details: if self.debug { detail } else { None },
        });

        (status, body).into_response()
    }
}

/// Render a handler panic as the generic 500 body
pub fn panic_response(panic: Box<dyn Any + Send + 'static>, debug: bool) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal(detail).with_debug(debug).into_response()
}
