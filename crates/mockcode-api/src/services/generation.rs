//! Image-to-code generation pipeline
//!
//! Stages run strictly in order: store → encode → prompt → infer → extract →
//! assemble. Any stage failure aborts the rest of the request.

use std::sync::Arc;
use std::time::Instant;

use mockcode_core::{AppError, GenerationRequest, GenerationResponse};
use mockcode_inference::InferenceProvider;
use mockcode_processing::{encode_file, extract_artifacts, PromptBuilder};
use mockcode_storage::Storage;

use super::assembler::assemble_response;
use crate::error::{encoding_error, upload_error};

#[derive(Clone)]
pub struct GenerationService {
    storage: Arc<dyn Storage>,
    inference: Arc<dyn InferenceProvider>,
    prompts: PromptBuilder,
}

impl GenerationService {
    pub fn new(
        storage: Arc<dyn Storage>,
        inference: Arc<dyn InferenceProvider>,
        prompts: PromptBuilder,
    ) -> Self {
        Self {
            storage,
            inference,
            prompts,
        }
    }

    pub async fn generate(
        &self,
        mut request: GenerationRequest,
    ) -> Result<GenerationResponse, AppError> {
        let start = Instant::now();

        let image_bytes = std::mem::take(&mut request.image_bytes);
        let stored = self
            .storage
            .store(&request.original_filename, image_bytes)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to store upload");
                upload_error(e)
            })?;

        tracing::info!(
            key = %stored.key,
            size_bytes = stored.size_bytes,
            "Upload stored"
        );

        let image = encode_file(&stored.path).await.map_err(encoding_error)?;
        let payload = self.prompts.build(&request, &image);

        tracing::debug!(
            variant = %self.prompts.variant(),
            prompt = %payload.prompt_text,
            "Built generation prompt"
        );

        let reply = self.inference.complete(&payload).await.map_err(|e| {
            tracing::warn!(provider = self.inference.name(), error = %e, "Inference failed");
            AppError::from(e)
        })?;

        let artifact = extract_artifacts(&reply.raw_text);
        if artifact.markup.is_empty() || artifact.stylesheet.is_empty() {
            tracing::warn!(
                has_markup = !artifact.markup.is_empty(),
                has_stylesheet = !artifact.stylesheet.is_empty(),
                "Provider reply is missing a fenced block"
            );
        }

        tracing::info!(
            key = %stored.key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Generation completed"
        );

        Ok(assemble_response(&stored, artifact))
    }
}
