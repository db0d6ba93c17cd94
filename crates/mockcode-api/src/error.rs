//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Every failure is
//! rendered as `{ error, details, code, recoverable }` with the status taken
//! from `ErrorMetadata`.

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mockcode_core::{AppError, ErrorMetadata, LogLevel};
use mockcode_processing::EncodingError;
use mockcode_storage::StorageError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable summary, e.g. "File upload failed"
    pub error: String,
    /// Underlying cause
    pub details: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            error: err.client_message(),
            details: err.detailed_message(),
            code: err.error_code().to_string(),
            recoverable: err.is_recoverable(),
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;
        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        (status, Json(ErrorResponse::from(app_error))).into_response()
    }
}

// Stage errors to AppError. Each stage maps to exactly one pipeline failure kind.

pub fn upload_error(err: StorageError) -> AppError {
    AppError::Upload(err.to_string())
}

pub fn encoding_error(err: EncodingError) -> AppError {
    AppError::Encoding(err.to_string())
}

pub fn multipart_error(err: MultipartError) -> AppError {
    AppError::Upload(with_sources(err.body_text(), &err))
}

pub fn multipart_rejection(rejection: MultipartRejection) -> AppError {
    AppError::Upload(rejection.body_text())
}

/// Append each distinct cause in `err`'s source chain to `head`.
///
/// Multipart stream errors carry the body length limit as a nested cause.
fn with_sources(head: String, err: &dyn std::error::Error) -> String {
    let mut text = head;
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}
