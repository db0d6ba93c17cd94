use async_trait::async_trait;
use mockcode_core::{InferenceRequest, InferenceResponse};

use crate::error::InferenceError;

/// A multimodal completion backend.
///
/// One call is one attempt at a single-turn exchange; implementations hold no
/// per-request state.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Send the request and return the first completion's raw text
    async fn complete(&self, request: &InferenceRequest)
        -> Result<InferenceResponse, InferenceError>;
}
