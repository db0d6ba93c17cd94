//! Application state
//!
//! Holds only process-wide, read-only collaborators. Per-request data lives in
//! the handler and is dropped with the response.

use mockcode_core::Config;
use mockcode_inference::InferenceProvider;
use mockcode_processing::PromptBuilder;
use mockcode_storage::Storage;
use std::sync::Arc;

use crate::services::generation::GenerationService;

#[derive(Clone)]
pub struct AppState {
    pub generation: GenerationService,
}

impl AppState {
    pub fn new(
        config: &Config,
        storage: Arc<dyn Storage>,
        inference: Arc<dyn InferenceProvider>,
    ) -> Self {
        let prompts = PromptBuilder::from_config(config.prompt_variant, &config.inference);
        Self {
            generation: GenerationService::new(storage, inference, prompts),
        }
    }
}
