//! Mockcode Core Library
//!
//! This crate provides the domain model, error types and configuration
//! shared by every stage of the image-to-code pipeline.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{Config, InferenceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    EncodedImage, Framework, GeneratedArtifact, GeneratedCode, GenerationRequest,
    GenerationResponse, InferenceRequest, InferenceResponse, PromptVariant, StoredUpload,
    StylingMode,
};
