//! Error types for the redbox server

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use redbox_core::StampError;
use serde::Serialize;
use thiserror::Error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to read multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Missing required field '{0}'")]
    MissingField(String),

    #[error("Field '{field}' is not a number: '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    #[error("PDF has no pages")]
    EmptyDocument,

    #[error("{0}")]
    CoordinateOutOfRange(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            // Oversized bodies surface here as 413, malformed ones as 400
            ServerError::Multipart(e) => (e.status(), "INVALID_MULTIPART"),
            ServerError::MissingField(_) => (StatusCode::BAD_REQUEST, "MISSING_FIELD"),
            ServerError::InvalidNumber { .. } => (StatusCode::BAD_REQUEST, "INVALID_NUMBER"),
            ServerError::InvalidPdf(_) => (StatusCode::BAD_REQUEST, "INVALID_PDF"),
            ServerError::EmptyDocument => (StatusCode::UNPROCESSABLE_ENTITY, "EMPTY_DOCUMENT"),
            ServerError::CoordinateOutOfRange(_) => (StatusCode::BAD_REQUEST, "INVALID_NUMBER"),
            ServerError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<StampError> for ServerError {
    fn from(err: StampError) -> Self {
        match err {
            StampError::ParseError(msg) => ServerError::InvalidPdf(msg),
            StampError::EmptyDocument => ServerError::EmptyDocument,
            StampError::CoordinateOutOfRange(msg) => ServerError::CoordinateOutOfRange(msg),
            StampError::OperationError(msg) => ServerError::Internal(msg),
        }
    }
}
