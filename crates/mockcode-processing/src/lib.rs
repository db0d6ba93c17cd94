//! Mockcode Processing Library
//!
//! The pure stages of the pipeline: encoding the stored mockup, building the
//! provider prompt, and extracting typed code from the provider's reply.

pub mod encoder;
pub mod extract;
pub mod prompt;

pub use encoder::{encode_bytes, encode_file, EncodingError};
pub use extract::{extract_artifacts, extract_fenced_block, FenceKind};
pub use prompt::PromptBuilder;
