//! Mockcode Inference Library
//!
//! Client for the external multimodal provider. The API crate depends on the
//! `InferenceProvider` trait only, so the OpenAI-compatible client can be
//! swapped out in tests.

pub mod error;
pub mod openai;
pub mod provider;
mod types;

pub use error::InferenceError;
pub use openai::OpenAiClient;
pub use provider::InferenceProvider;
