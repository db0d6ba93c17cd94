use mockcode_core::AppError;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    /// Provider answered 401 or 403
    #[error("Provider denied the request ({status}): {message}")]
    PermissionDenied { status: u16, message: String },

    #[error("Provider did not answer within {0:?}")]
    Timeout(Duration),

    #[error("Provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Request to provider failed: {message}")]
    Transport { message: String, connect: bool },

    #[error("Failed to decode provider response: {0}")]
    Decode(String),

    #[error("Provider response contained no completion text")]
    EmptyResponse,

    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

impl InferenceError {
    /// Transient faults worth another attempt. Permission errors never are.
    pub fn is_retryable(&self) -> bool {
        match self {
            InferenceError::Transport { connect, .. } => *connect,
            InferenceError::Provider { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            InferenceError::Decode(err.to_string())
        } else {
            InferenceError::Transport {
                message: err.to_string(),
                connect: err.is_connect(),
            }
        }
    }
}

impl From<InferenceError> for AppError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::PermissionDenied { .. } => AppError::InferenceAuth(err.to_string()),
            InferenceError::Timeout(after) => AppError::InferenceTimeout(after.as_secs()),
            other => AppError::Inference(other.to_string()),
        }
    }
}
