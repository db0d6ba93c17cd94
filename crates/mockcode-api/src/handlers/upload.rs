use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use mockcode_core::GenerationResponse;

use crate::error::{multipart_rejection, HttpAppError};
use crate::services::intake::read_upload_form;
use crate::state::AppState;

/// Upload a mockup and generate code for it
///
/// # Returns
/// `GenerationResponse` with the stored file path and the generated JSX and CSS (HTTP 200)
///
/// # Errors
/// - 500 `File upload failed` - missing file, malformed body, or disk write failure
/// - 403 `Error processing image` - provider rejected the credentials
/// - 504 `Error processing image` - provider did not answer in time
/// - 500 `Error processing image` - any other processing failure
#[tracing::instrument(skip(state, multipart), fields(operation = "generate_code"))]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerationResponse>, HttpAppError> {
    let multipart = multipart.map_err(multipart_rejection)?;
    let request = read_upload_form(multipart).await?;

    tracing::info!(
        framework = %request.framework,
        known_framework = request.framework.is_known(),
        css_type = %request.styling_mode,
        has_additional_input = request.extra_instructions().is_some(),
        original_filename = %request.original_filename,
        size_bytes = request.image_bytes.len(),
        "Received mockup upload"
    );

    let response = state.generation.generate(request).await?;
    Ok(Json(response))
}
