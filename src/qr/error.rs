//! Error kinds surfaced by the QR request handler.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that can occur while validating, encoding or routing a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrError {
    /// A required parameter was absent or blank.
    #[error("Missing required parameter '{0}'")]
    MissingParameter(&'static str),

    /// Content exceeds the configured character limit.
    #[error("Content is {length} characters long, maximum is {max}")]
    ContentTooLong { length: usize, max: usize },

    /// Requested output format is not one of the supported kinds.
    #[error("Unsupported format '{0}', expected one of png, svg, base64, terminal")]
    InvalidFormat(String),

    /// Malformed numeric, color or level input.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The encoder rejected the request or did not finish in time.
    #[error("QR generation failed: {0}")]
    EncodingFailed(String),

    /// No route matched the request.
    #[error("No route for {0}")]
    NotFound(String),
}

impl QrError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// HTTP status reported for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            QrError::MissingParameter(_)
            | QrError::ContentTooLong { .. }
            | QrError::InvalidFormat(_)
            | QrError::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
            QrError::EncodingFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            QrError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Stable machine-readable kind name.
    pub fn code(&self) -> &'static str {
        match self {
            QrError::MissingParameter(_) => "MissingParameter",
            QrError::ContentTooLong { .. } => "ContentTooLong",
            QrError::InvalidFormat(_) => "InvalidFormat",
            QrError::InvalidParameter { .. } => "InvalidParameter",
            QrError::EncodingFailed(_) => "EncodingFailed",
            QrError::NotFound(_) => "NotFound",
        }
    }

    /// Short headline used in the `error` field of the envelope.
    pub fn headline(&self) -> String {
        match self {
            QrError::MissingParameter(name) => format!("Missing required parameter '{}'", name),
            QrError::ContentTooLong { .. } => "Content too long".to_string(),
            QrError::InvalidFormat(_) => "Invalid format".to_string(),
            QrError::InvalidParameter { name, .. } => format!("Invalid parameter '{}'", name),
            QrError::EncodingFailed(_) => "QR generation failed".to_string(),
            QrError::NotFound(_) => "Endpoint not found".to_string(),
        }
    }
}
