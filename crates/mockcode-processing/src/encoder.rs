//! Binary encoder: stored bytes to base64 text

use base64::Engine;
use mockcode_core::EncodedImage;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn encode_bytes(data: &[u8]) -> EncodedImage {
    EncodedImage::jpeg(base64::engine::general_purpose::STANDARD.encode(data))
}

/// Read the file at `path` fully and encode it.
pub async fn encode_file(path: &Path) -> Result<EncodedImage, EncodingError> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|source| EncodingError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %path.display(), size_bytes = data.len(), "Encoding stored upload");
    Ok(encode_bytes(&data))
}
