//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p mockcode-api`. The inference
//! provider is replaced by `FakeProvider`; uploads go to a temp directory.

#![allow(dead_code)]

pub mod fixtures;

use async_trait::async_trait;
use axum_test::TestServer;
use mockcode_api::setup::routes;
use mockcode_api::state::AppState;
use mockcode_core::{Config, InferenceRequest, InferenceResponse, PromptVariant, StoredUpload};
use mockcode_inference::{InferenceError, InferenceProvider};
use mockcode_storage::{LocalStorage, Storage, StorageResult};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// How the fake provider answers
#[derive(Debug, Clone)]
pub enum FakeReply {
    Text(String),
    Deny,
    Fail,
    Timeout,
}

/// In-process provider that records the last request it was sent.
pub struct FakeProvider {
    reply: FakeReply,
    last_request: Mutex<Option<InferenceRequest>>,
}

impl FakeProvider {
    pub fn new(reply: FakeReply) -> Self {
        Self {
            reply,
            last_request: Mutex::new(None),
        }
    }

    pub fn last_request(&self) -> Option<InferenceRequest> {
        self.last_request.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl InferenceProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    async fn complete(
        &self,
        request: &InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError> {
        *self.last_request.lock().expect("lock poisoned") = Some(request.clone());

        match &self.reply {
            FakeReply::Text(text) => Ok(InferenceResponse {
                raw_text: text.clone(),
            }),
            FakeReply::Deny => Err(InferenceError::PermissionDenied {
                status: 403,
                message: "Permission denied".to_string(),
            }),
            FakeReply::Fail => Err(InferenceError::Provider {
                status: 500,
                message: "upstream exploded".to_string(),
            }),
            FakeReply::Timeout => Err(InferenceError::Timeout(Duration::from_secs(120))),
        }
    }
}

/// Test application: server, fake provider, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub provider: Arc<FakeProvider>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn uploads_dir(&self) -> &Path {
        self._temp_dir.path()
    }

    pub fn last_request(&self) -> InferenceRequest {
        self.provider
            .last_request()
            .expect("Provider was never called")
    }
}

pub async fn setup_test_app(reply: FakeReply) -> TestApp {
    setup_test_app_with_variant(reply, PromptVariant::Extended).await
}

/// Storage that reports success without writing, so the stored path does not exist.
pub struct VanishingStorage {
    base_path: PathBuf,
}

#[async_trait]
impl Storage for VanishingStorage {
    async fn store(&self, original_filename: &str, data: Vec<u8>) -> StorageResult<StoredUpload> {
        let key = format!("vanished-{}", original_filename);
        Ok(StoredUpload {
            path: self.base_path.join(&key),
            public_path: format!("/uploads/{}", key),
            key,
            size_bytes: data.len() as u64,
        })
    }
}

pub async fn setup_test_app_with_variant(reply: FakeReply, variant: PromptVariant) -> TestApp {
    build_test_app(reply, variant, false).await
}

pub async fn setup_test_app_with_vanishing_storage(reply: FakeReply) -> TestApp {
    build_test_app(reply, PromptVariant::Extended, true).await
}

async fn build_test_app(reply: FakeReply, variant: PromptVariant, vanishing: bool) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");

    let config = Config {
        uploads_dir: temp_dir.path().to_path_buf(),
        public_dir: temp_dir.path().join("public"),
        prompt_variant: variant,
        ..Config::default()
    };

    let storage: Arc<dyn Storage> = if vanishing {
        Arc::new(VanishingStorage {
            base_path: config.uploads_dir.clone(),
        })
    } else {
        Arc::new(
            LocalStorage::new(&config.uploads_dir, "/uploads")
                .await
                .expect("Failed to create local storage"),
        )
    };
    let provider = Arc::new(FakeProvider::new(reply));

    let state = Arc::new(AppState::new(
        &config,
        storage,
        provider.clone() as Arc<dyn InferenceProvider>,
    ));
    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        provider,
        _temp_dir: temp_dir,
    }
}
