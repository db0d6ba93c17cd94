//! Error types module
//!
//! Every pipeline stage reports failure through `AppError`. A failure aborts
//! the remaining stages of that request only; no partial artifacts are returned.

/// Fixed `details` text for a provider permission failure.
pub const PERMISSION_DENIED_DETAILS: &str =
    "Request failed with status code 403. Please check your API key and permissions.";

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Warn,
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UPLOAD_FAILED")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Stable client-facing summary
    fn client_message(&self) -> String;

    /// Human-readable cause sent as `details`
    fn detailed_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing file, malformed multipart body, or failed disk write
    #[error("Upload error: {0}")]
    Upload(String),

    /// Stored upload could not be read back
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Provider rejected the credentials or the quota
    #[error("Inference permission denied: {0}")]
    InferenceAuth(String),

    #[error("Inference timed out after {0} seconds")]
    InferenceTimeout(u64),

    /// Any other transport or provider fault
    #[error("Inference error: {0}")]
    Inference(String),
}

/// Static metadata for each variant: (http_status, error_code, recoverable, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::Upload(_) => (500, "UPLOAD_FAILED", false, LogLevel::Warn),
        AppError::Encoding(_) => (500, "ENCODING_FAILED", false, LogLevel::Error),
        AppError::InferenceAuth(_) => (403, "INFERENCE_PERMISSION_DENIED", false, LogLevel::Warn),
        AppError::InferenceTimeout(_) => (504, "INFERENCE_TIMEOUT", true, LogLevel::Warn),
        AppError::Inference(_) => (500, "INFERENCE_FAILED", true, LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Upload(_) => "File upload failed".to_string(),
            AppError::Encoding(_)
            | AppError::InferenceAuth(_)
            | AppError::InferenceTimeout(_)
            | AppError::Inference(_) => "Error processing image".to_string(),
        }
    }

    fn detailed_message(&self) -> String {
        match self {
            AppError::Upload(msg)
            | AppError::Encoding(msg)
            | AppError::Inference(msg) => msg.clone(),
            AppError::InferenceAuth(_) => PERMISSION_DENIED_DETAILS.to_string(),
            AppError::InferenceTimeout(_) => self.to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }
}

impl AppError {
    /// Variant name, used as a structured log field
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Upload(_) => "Upload",
            AppError::Encoding(_) => "Encoding",
            AppError::InferenceAuth(_) => "InferenceAuth",
            AppError::InferenceTimeout(_) => "InferenceTimeout",
            AppError::Inference(_) => "Inference",
        }
    }
}
