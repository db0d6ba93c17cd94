//! Application setup and initialization
//!
//! Wires configuration into the storage backend, the inference client and the
//! router. Kept out of `main.rs` so integration tests can build the same app.

pub mod routes;
pub mod server;

use crate::constants::UPLOADS_PUBLIC_PREFIX;
use crate::state::AppState;
use anyhow::{Context, Result};
use mockcode_core::Config;
use mockcode_inference::{InferenceProvider, OpenAiClient};
use mockcode_storage::{LocalStorage, Storage};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: &Config) -> Result<axum::Router> {
    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(&config.uploads_dir, UPLOADS_PUBLIC_PREFIX)
            .await
            .context("Failed to initialize upload storage")?,
    );
    tracing::info!(uploads_dir = %config.uploads_dir.display(), "Upload storage ready");

    let inference: Arc<dyn InferenceProvider> = Arc::new(
        OpenAiClient::new(&config.inference).context("Failed to initialize inference client")?,
    );
    tracing::info!(
        provider = inference.name(),
        model = %config.inference.model,
        base_url = %config.inference.base_url,
        max_retries = config.inference.max_retries,
        "Inference client ready"
    );

    let state = Arc::new(AppState::new(config, storage, inference));
    routes::setup_routes(config, state)
}
