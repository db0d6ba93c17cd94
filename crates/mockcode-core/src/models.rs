//! Domain models for the image-to-code pipeline
//!
//! Every value here is owned by a single request: it is built while the
//! request is handled and dropped once the response is sent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Mime type sent to the provider for every upload.
pub const IMAGE_MIME_TYPE: &str = "image/jpeg";

/// Success message of the `/upload` response.
pub const UPLOAD_SUCCESS_MESSAGE: &str = "File uploaded successfully";

/// Target framework as selected by the client.
///
/// Values are not validated: whatever the client sends is named in the
/// prompt verbatim, including the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Framework(String);

impl Framework {
    pub const REACT: &'static str = "reactjs";
    pub const NEXT: &'static str = "nextjs";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the value is one the client UI offers. Used for logging only.
    pub fn is_known(&self) -> bool {
        matches!(self.0.as_str(), Self::REACT | Self::NEXT)
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Framework {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Styling approach as selected by the client (`cssType` form field).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StylingMode(String);

impl StylingMode {
    pub const TAILWIND: &'static str = "tailwindcss";
    pub const CUSTOM_CLASSES: &'static str = "custom css classes";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn custom_classes() -> Self {
        Self(Self::CUSTOM_CLASSES.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StylingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for StylingMode {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Which prompt template the server speaks.
///
/// `Legacy` always asks for custom css classes and ignores free-text
/// instructions. `Extended` honours the client's styling mode and
/// additional instructions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptVariant {
    Legacy,
    #[default]
    Extended,
}

impl FromStr for PromptVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "legacy" => Ok(PromptVariant::Legacy),
            "extended" => Ok(PromptVariant::Extended),
            other => Err(format!(
                "Unknown prompt variant '{}', expected 'legacy' or 'extended'",
                other
            )),
        }
    }
}

impl fmt::Display for PromptVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptVariant::Legacy => f.write_str("legacy"),
            PromptVariant::Extended => f.write_str("extended"),
        }
    }
}

/// A parsed `/upload` call. Immutable once built.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub image_bytes: Vec<u8>,
    pub original_filename: String,
    pub framework: Framework,
    pub styling_mode: StylingMode,
    pub extra_instructions: Option<String>,
}

impl GenerationRequest {
    /// Free-text instructions, if any non-blank text was supplied.
    pub fn extra_instructions(&self) -> Option<&str> {
        self.extra_instructions
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// An upload persisted by the intake stage. Never deleted by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    /// Storage key (generated filename)
    pub key: String,
    /// Location on disk
    pub path: PathBuf,
    /// Public-facing relative path, e.g. `/uploads/{key}`
    pub public_path: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: &'static str,
    pub base64_payload: String,
}

impl EncodedImage {
    pub fn jpeg(base64_payload: String) -> Self {
        Self {
            mime_type: IMAGE_MIME_TYPE,
            base64_payload,
        }
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_payload)
    }
}

/// Provider-agnostic multimodal request, built fresh for every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRequest {
    pub model: String,
    pub prompt_text: String,
    pub image_data_uri: String,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceResponse {
    pub raw_text: String,
}

/// The two generated outputs. Either may be empty when the provider
/// omitted the corresponding fenced block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub markup: String,
    pub stylesheet: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    pub jsx: String,
    pub css: String,
}

impl From<GeneratedArtifact> for GeneratedCode {
    fn from(artifact: GeneratedArtifact) -> Self {
        Self {
            jsx: artifact.markup,
            css: artifact.stylesheet,
        }
    }
}

/// Body of a successful `/upload` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub message: String,
    pub file_path: String,
    pub generated_code: GeneratedCode,
}
