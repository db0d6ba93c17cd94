//! Request fixtures

#![allow(dead_code)]

use axum_test::multipart::{MultipartForm, Part};

/// Fake JPEG: SOI marker, filler, EOI marker.
pub fn create_test_jpeg(len: usize) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
    data.extend((0..len.saturating_sub(6)).map(|i| (i % 251) as u8));
    data.extend([0xFF, 0xD9]);
    data
}

pub fn upload_form(
    image: Vec<u8>,
    framework: &str,
    css_type: &str,
    additional_input: Option<&str>,
) -> MultipartForm {
    let part = Part::bytes(image)
        .file_name("mockup.jpg")
        .mime_type("image/jpeg");
    let form = MultipartForm::new()
        .add_part("file", part)
        .add_text("framework", framework.to_string())
        .add_text("cssType", css_type.to_string());
    match additional_input {
        Some(extra) => form.add_text("additionalInput", extra.to_string()),
        None => form,
    }
}

pub const REPLY_WITH_BOTH_BLOCKS: &str = "Here is your component:\n\
```jsx\n\
export default function Hero() {\n\
  return <button className=\"cta\">Go</button>;\n\
}\n\
```\n\
And the styles:\n\
```css\n\
.cta {\n\
  color: blue;\n\
}\n\
```\n";
