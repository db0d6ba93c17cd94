//! OpenAI-compatible chat completions client with image input

use async_trait::async_trait;
use mockcode_core::{InferenceConfig, InferenceRequest, InferenceResponse};
use reqwest::StatusCode;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::{Duration, Instant};

use crate::error::InferenceError;
use crate::provider::InferenceProvider;
use crate::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ContentPart, ErrorEnvelope,
    ImageUrl,
};

const RETRY_BASE_DELAY_MS: u64 = 250;

/// Upper bound on the delay between two attempts.
pub const MAX_RETRY_BACKOFF_MS: u64 = 30_000;

/// Exponential backoff for the given zero-based retry, capped at `MAX_RETRY_BACKOFF_MS`.
pub(crate) fn compute_retry_backoff(attempt: u32) -> Duration {
    Duration::from_millis(
        RETRY_BASE_DELAY_MS
            .saturating_mul(2_u64.saturating_pow(attempt))
            .min(MAX_RETRY_BACKOFF_MS),
    )
}

pub struct OpenAiClient {
    http_client: reqwest::Client,
    api_key: String,
    endpoint: String,
    timeout: Option<Duration>,
    max_retries: u32,
}

impl Debug for OpenAiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("OpenAiClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl OpenAiClient {
    pub fn new(config: &InferenceConfig) -> Result<Self, InferenceError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| InferenceError::Client(e.to_string()))?;

        if config.api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY is not set; the provider will reject generation requests");
        }

        Ok(Self {
            http_client,
            // A missing key is sent as an empty token and reported by the provider.
            api_key: config.api_key.clone().unwrap_or_default(),
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            timeout: config.timeout,
            max_retries: config.max_retries,
        })
    }

    fn build_body(request: &InferenceRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: request.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ContentPart::Text {
                        text: request.prompt_text.clone(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: request.image_data_uri.clone(),
                        },
                    },
                ],
            }],
            max_tokens: request.max_output_tokens,
        }
    }

    async fn send_once(
        &self,
        body: &ChatCompletionRequest,
    ) -> Result<InferenceResponse, InferenceError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<ErrorEnvelope>(&error_text)
                .map(|envelope| envelope.error.message)
                .unwrap_or(error_text);

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    InferenceError::PermissionDenied {
                        status: status.as_u16(),
                        message,
                    }
                }
                _ => InferenceError::Provider {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if let Some(usage) = &parsed.usage {
            tracing::info!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Provider token usage"
            );
        }

        let raw_text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(InferenceError::EmptyResponse)?;

        Ok(InferenceResponse { raw_text })
    }

    fn map_transport_error(&self, err: reqwest::Error) -> InferenceError {
        match self.timeout {
            Some(timeout) if err.is_timeout() => InferenceError::Timeout(timeout),
            _ => err.into(),
        }
    }
}

#[async_trait]
impl InferenceProvider for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(
        &self,
        request: &InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError> {
        let body = Self::build_body(request);

        tracing::info!(
            model = %request.model,
            prompt_len = request.prompt_text.len(),
            image_uri_len = request.image_data_uri.len(),
            max_tokens = request.max_output_tokens,
            "Sending generation request to provider"
        );

        let mut attempt = 0;
        loop {
            let start = Instant::now();
            let result = self.send_once(&body).await;
            let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

            match result {
                Ok(response) => {
                    tracing::info!(
                        duration_ms,
                        attempt,
                        reply_len = response.raw_text.len(),
                        "Provider request successful"
                    );
                    return Ok(response);
                }
                Err(err) if err.is_retryable() && attempt < self.max_retries => {
                    let delay = compute_retry_backoff(attempt);
                    tracing::warn!(
                        error = %err,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Provider request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::error!(error = %err, duration_ms, attempt, "Provider request failed");
                    return Err(err);
                }
            }
        }
    }
}
