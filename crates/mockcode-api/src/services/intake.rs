//! Upload intake: multipart body to `GenerationRequest`

use axum::extract::Multipart;
use mockcode_core::{AppError, Framework, GenerationRequest, StylingMode};

use crate::constants::fields;
use crate::error::multipart_error;

/// Read the `/upload` form.
///
/// Exactly one `file` field is required. Text fields default to empty and are
/// passed through unvalidated; unknown fields are ignored.
pub async fn read_upload_form(mut multipart: Multipart) -> Result<GenerationRequest, AppError> {
    let mut file: Option<(Vec<u8>, String)> = None;
    let mut framework = String::new();
    let mut css_type = String::new();
    let mut additional_input: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            fields::FILE => {
                if file.is_some() {
                    return Err(AppError::Upload(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    ));
                }
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "upload".to_string());
                let data = field.bytes().await.map_err(multipart_error)?;
                file = Some((data.to_vec(), filename));
            }
            fields::FRAMEWORK => framework = field.text().await.map_err(multipart_error)?,
            fields::CSS_TYPE => css_type = field.text().await.map_err(multipart_error)?,
            fields::ADDITIONAL_INPUT => {
                additional_input = Some(field.text().await.map_err(multipart_error)?)
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown multipart field");
            }
        }
    }

    let (image_bytes, original_filename) =
        file.ok_or_else(|| AppError::Upload("No file provided".to_string()))?;

    Ok(GenerationRequest {
        image_bytes,
        original_filename,
        framework: Framework::new(framework),
        styling_mode: StylingMode::new(css_type),
        extra_instructions: additional_input,
    })
}
