//! Result assembly: stored upload + artifacts to the response body

use mockcode_core::models::UPLOAD_SUCCESS_MESSAGE;
use mockcode_core::{GeneratedArtifact, GenerationResponse, StoredUpload};

pub fn assemble_response(upload: &StoredUpload, artifact: GeneratedArtifact) -> GenerationResponse {
    GenerationResponse {
        message: UPLOAD_SUCCESS_MESSAGE.to_string(),
        file_path: upload.public_path.clone(),
        generated_code: artifact.into(),
    }
}
