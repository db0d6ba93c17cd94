//! Response extraction: fenced code blocks to typed artifacts
//!
//! The provider reply is free text. Each artifact kind is located by a small
//! scanner with two states: seeking the opening fence, then inside the block
//! until the first closing fence. Only the first complete block of each kind
//! counts. A missing block yields an empty artifact, never an error.

use mockcode_core::GeneratedArtifact;

const CLOSE_FENCE: &str = "```";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Markup,
    Stylesheet,
}

impl FenceKind {
    /// Opening marker, including the newline that must follow the label
    pub fn open_marker(self) -> &'static str {
        match self {
            FenceKind::Markup => "```jsx\n",
            FenceKind::Stylesheet => "```css\n",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
    SeekingOpen,
    InsideBlock { content_start: usize },
}

/// Raw content of the first complete block of `kind`, if any.
pub fn extract_fenced_block(text: &str, kind: FenceKind) -> Option<&str> {
    let open = kind.open_marker();
    let mut state = ScanState::SeekingOpen;

    loop {
        state = match state {
            ScanState::SeekingOpen => {
                let found = text.find(open)?;
                ScanState::InsideBlock {
                    content_start: found + open.len(),
                }
            }
            ScanState::InsideBlock { content_start } => {
                // An unterminated first block means no later block can close either.
                let len = text[content_start..].find(CLOSE_FENCE)?;
                return Some(&text[content_start..content_start + len]);
            }
        };
    }
}

/// Strip line breaks and `+` continuation artifacts from block content.
fn normalize(content: &str) -> String {
    content.chars().filter(|c| *c != '\n' && *c != '+').collect()
}

pub fn extract_artifacts(raw_text: &str) -> GeneratedArtifact {
    let markup = extract_fenced_block(raw_text, FenceKind::Markup)
        .map(normalize)
        .unwrap_or_default();
    let stylesheet = extract_fenced_block(raw_text, FenceKind::Stylesheet)
        .map(normalize)
        .unwrap_or_default();

    tracing::debug!(
        markup_len = markup.len(),
        stylesheet_len = stylesheet.len(),
        "Extracted generated code"
    );

    GeneratedArtifact { markup, stylesheet }
}
