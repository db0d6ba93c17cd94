//! Upload endpoint integration tests.
//!
//! Run with: `cargo test -p mockcode-api --test upload_test`

mod helpers;

use helpers::fixtures::{create_test_jpeg, upload_form, REPLY_WITH_BOTH_BLOCKS};
use helpers::{
    setup_test_app, setup_test_app_with_vanishing_storage, setup_test_app_with_variant, FakeReply,
};
use mockcode_core::error::PERMISSION_DENIED_DETAILS;
use axum_test::multipart::{MultipartForm, Part};
use mockcode_core::PromptVariant;
use serde_json::Value;

#[tokio::test]
async fn test_upload_stores_file_and_returns_public_path() {
    let app = setup_test_app(FakeReply::Text(REPLY_WITH_BOTH_BLOCKS.to_string())).await;
    let image = create_test_jpeg(2048);

    let response = app
        .client()
        .post("/upload")
        .multipart(upload_form(image.clone(), "reactjs", "tailwindcss", None))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "File uploaded successfully");

    let file_path = body["filePath"].as_str().expect("filePath missing");
    assert!(file_path.starts_with("/uploads/"));
    assert!(file_path.ends_with("-mockup.jpg"));

    let stored_name = file_path.trim_start_matches("/uploads/");
    let on_disk = std::fs::metadata(app.uploads_dir().join(stored_name)).expect("stored file");
    assert_eq!(on_disk.len(), image.len() as u64);

    let served = app.client().get(file_path).await;
    assert_eq!(served.status_code(), 200);
    assert_eq!(served.as_bytes().as_ref(), image.as_slice());
}

#[tokio::test]
async fn test_generated_code_is_flattened() {
    let reply = "```jsx\n<div className=\"a\">\n  {count + 1}\n</div>\n```\n\
                 ```css\n.a {\n  margin: 0 +1px;\n}\n```";
    let app = setup_test_app(FakeReply::Text(reply.to_string())).await;

    let response = app
        .client()
        .post("/upload")
        .multipart(upload_form(create_test_jpeg(512), "reactjs", "tailwindcss", None))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let jsx = body["generatedCode"]["jsx"].as_str().expect("jsx missing");
    let css = body["generatedCode"]["css"].as_str().expect("css missing");

    assert!(!jsx.is_empty());
    assert!(!css.is_empty());
    for code in [jsx, css] {
        assert!(!code.contains('\n'));
        assert!(!code.contains('+'));
    }
    assert_eq!(jsx, "<div className=\"a\">  {count  1}</div>");
    assert_eq!(css, ".a {  margin: 0 1px;}");
}

#[tokio::test]
async fn test_reply_without_blocks_still_succeeds() {
    let app = setup_test_app(FakeReply::Text(
        "Sorry, I cannot read that image.".to_string(),
    ))
    .await;

    let response = app
        .client()
        .post("/upload")
        .multipart(upload_form(create_test_jpeg(512), "nextjs", "tailwindcss", None))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["generatedCode"]["jsx"], "");
    assert_eq!(body["generatedCode"]["css"], "");
    assert!(body["filePath"].as_str().is_some());
}

#[tokio::test]
async fn test_permission_denied_maps_to_403() {
    let app = setup_test_app(FakeReply::Deny).await;

    let response = app
        .client()
        .post("/upload")
        .multipart(upload_form(create_test_jpeg(512), "reactjs", "tailwindcss", None))
        .await;

    assert_eq!(response.status_code(), 403);
    let body: Value = response.json();
    assert_eq!(body["error"], "Error processing image");
    assert_eq!(body["details"], PERMISSION_DENIED_DETAILS);
    assert_eq!(body["code"], "INFERENCE_PERMISSION_DENIED");
}

#[tokio::test]
async fn test_provider_failure_maps_to_500() {
    let app = setup_test_app(FakeReply::Fail).await;

    let response = app
        .client()
        .post("/upload")
        .multipart(upload_form(create_test_jpeg(512), "reactjs", "tailwindcss", None))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"], "Error processing image");
    assert!(body["details"]
        .as_str()
        .expect("details missing")
        .contains("upstream exploded"));
}

#[tokio::test]
async fn test_provider_timeout_maps_to_504() {
    let app = setup_test_app(FakeReply::Timeout).await;

    let response = app
        .client()
        .post("/upload")
        .multipart(upload_form(create_test_jpeg(512), "reactjs", "tailwindcss", None))
        .await;

    assert_eq!(response.status_code(), 504);
    let body: Value = response.json();
    assert_eq!(body["error"], "Error processing image");
    assert_eq!(body["code"], "INFERENCE_TIMEOUT");
}

#[tokio::test]
async fn test_missing_file_is_upload_failure() {
    let app = setup_test_app(FakeReply::Text(REPLY_WITH_BOTH_BLOCKS.to_string())).await;

    let form = MultipartForm::new()
        .add_text("framework", "reactjs")
        .add_text("cssType", "tailwindcss");
    let response = app.client().post("/upload").multipart(form).await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"], "File upload failed");
    assert!(app.provider.last_request().is_none());
}

#[tokio::test]
async fn test_second_file_field_is_upload_failure() {
    let app = setup_test_app(FakeReply::Text(REPLY_WITH_BOTH_BLOCKS.to_string())).await;

    let second = Part::bytes(create_test_jpeg(128))
        .file_name("second.jpg")
        .mime_type("image/jpeg");
    let form = upload_form(create_test_jpeg(128), "reactjs", "tailwindcss", None)
        .add_part("file", second);
    let response = app.client().post("/upload").multipart(form).await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"], "File upload failed");
    assert!(body["details"]
        .as_str()
        .expect("details missing")
        .contains("Multiple file fields are not allowed"));
    assert!(app.provider.last_request().is_none());
}

#[tokio::test]
async fn test_unknown_fields_are_ignored() {
    let app = setup_test_app(FakeReply::Text(REPLY_WITH_BOTH_BLOCKS.to_string())).await;

    let form = upload_form(create_test_jpeg(256), "reactjs", "tailwindcss", None)
        .add_text("theme", "midnight-purple")
        .add_text("userId", "42");
    let response = app.client().post("/upload").multipart(form).await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(!body["generatedCode"]["jsx"]
        .as_str()
        .expect("jsx missing")
        .is_empty());

    let prompt = app.last_request().prompt_text;
    assert!(prompt.contains("reactjs"));
    assert!(!prompt.contains("midnight-purple"));
}

#[tokio::test]
async fn test_unreadable_upload_is_encoding_failure() {
    let app =
        setup_test_app_with_vanishing_storage(FakeReply::Text(REPLY_WITH_BOTH_BLOCKS.to_string()))
            .await;

    let response = app
        .client()
        .post("/upload")
        .multipart(upload_form(create_test_jpeg(256), "reactjs", "tailwindcss", None))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"], "Error processing image");
    assert_eq!(body["code"], "ENCODING_FAILED");
    assert!(body["details"]
        .as_str()
        .expect("details missing")
        .contains("vanished-mockup.jpg"));
    assert!(app.provider.last_request().is_none());
}

#[tokio::test]
async fn test_malformed_body_is_upload_failure() {
    let app = setup_test_app(FakeReply::Text(REPLY_WITH_BOTH_BLOCKS.to_string())).await;

    let response = app
        .client()
        .post("/upload")
        .add_header("Content-Type", "multipart/form-data")
        .bytes(create_test_jpeg(64).into())
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"], "File upload failed");
}

#[tokio::test]
async fn test_prompt_interpolates_form_fields() {
    let app = setup_test_app(FakeReply::Text(REPLY_WITH_BOTH_BLOCKS.to_string())).await;

    let response = app
        .client()
        .post("/upload")
        .multipart(upload_form(
            create_test_jpeg(10 * 1024),
            "reactjs",
            "tailwindcss",
            Some("make the button blue"),
        ))
        .await;

    assert_eq!(response.status_code(), 200);
    let request = app.last_request();
    assert!(request.prompt_text.contains("reactjs"));
    assert!(request.prompt_text.contains("tailwindcss"));
    assert!(request.prompt_text.contains("make the button blue"));
    assert!(request.image_data_uri.starts_with("data:image/jpeg;base64,"));
    assert_eq!(request.model, "gpt-4o-mini");
    assert_eq!(request.max_output_tokens, 4096);
}

#[tokio::test]
async fn test_legacy_variant_ignores_styling_and_extra_input() {
    let app = setup_test_app_with_variant(
        FakeReply::Text(REPLY_WITH_BOTH_BLOCKS.to_string()),
        PromptVariant::Legacy,
    )
    .await;

    let response = app
        .client()
        .post("/upload")
        .multipart(upload_form(
            create_test_jpeg(1024),
            "nextjs",
            "tailwindcss",
            Some("make the button blue"),
        ))
        .await;

    assert_eq!(response.status_code(), 200);
    let request = app.last_request();
    assert!(request.prompt_text.contains("nextjs"));
    assert!(request.prompt_text.contains("custom css classes"));
    assert!(!request.prompt_text.contains("tailwindcss"));
    assert!(!request.prompt_text.contains("make the button blue"));
}

#[tokio::test]
async fn test_unknown_framework_is_passed_through() {
    let app = setup_test_app(FakeReply::Text(REPLY_WITH_BOTH_BLOCKS.to_string())).await;

    let response = app
        .client()
        .post("/upload")
        .multipart(upload_form(create_test_jpeg(256), "svelte", "", None))
        .await;

    assert_eq!(response.status_code(), 200);
    assert!(app.last_request().prompt_text.contains("svelte"));
}

#[tokio::test]
async fn test_concurrent_uploads_get_distinct_paths() {
    let app = setup_test_app(FakeReply::Text(REPLY_WITH_BOTH_BLOCKS.to_string())).await;

    let upload = || async {
        app.client()
            .post("/upload")
            .multipart(upload_form(create_test_jpeg(256), "reactjs", "tailwindcss", None))
            .await
    };
    let (first, second) = tokio::join!(upload(), upload());

    let first: Value = first.json();
    let second: Value = second.json();
    assert_ne!(first["filePath"], second["filePath"]);
}

#[tokio::test]
async fn test_health() {
    let app = setup_test_app(FakeReply::Text(String::new())).await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}
