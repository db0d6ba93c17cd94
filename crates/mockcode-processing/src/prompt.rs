//! Prompt construction for the inference provider

use mockcode_core::{
    EncodedImage, Framework, GenerationRequest, InferenceConfig, InferenceRequest, PromptVariant,
    StylingMode,
};

use crate::extract::FenceKind;

/// Builds the single-turn multimodal request sent for every upload.
///
/// Framework and styling values are named verbatim, unknown or empty ones included.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    variant: PromptVariant,
    model: String,
    max_tokens: u32,
}

impl PromptBuilder {
    pub fn new(variant: PromptVariant, model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            variant,
            model: model.into(),
            max_tokens,
        }
    }

    pub fn from_config(variant: PromptVariant, config: &InferenceConfig) -> Self {
        Self::new(variant, config.model.clone(), config.max_tokens)
    }

    pub fn variant(&self) -> PromptVariant {
        self.variant
    }

    pub fn build_prompt_text(&self, request: &GenerationRequest) -> String {
        let styling = match self.variant {
            PromptVariant::Legacy => StylingMode::custom_classes(),
            PromptVariant::Extended => request.styling_mode.clone(),
        };

        let mut prompt = instruction(&request.framework, &styling);

        if self.variant == PromptVariant::Extended {
            if let Some(extra) = request.extra_instructions() {
                prompt.push_str(&format!(" Additional instructions: {}.", extra));
            }
        }

        prompt
    }

    pub fn build(&self, request: &GenerationRequest, image: &EncodedImage) -> InferenceRequest {
        InferenceRequest {
            model: self.model.clone(),
            prompt_text: self.build_prompt_text(request),
            image_data_uri: image.data_uri(),
            max_output_tokens: self.max_tokens,
        }
    }
}

fn instruction(framework: &Framework, styling: &StylingMode) -> String {
    format!(
        "Generate code in {framework} for the given layout along with the css using {styling}. \
         Return the code in JSX format, ready to be used in a React component. \
         Include both the JSX and CSS in your response. \
         Make sure the generated code for the component is responsive for all the devices and screen sizes. \
         Format the response with exactly one {markup} fenced code block containing the component \
         and exactly one {stylesheet} fenced code block containing the styles.",
        markup = FenceKind::Markup.open_marker().trim_end(),
        stylesheet = FenceKind::Stylesheet.open_marker().trim_end(),
    )
}
