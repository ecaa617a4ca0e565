//! Generation request orchestration.
//!
//! [`Orchestrator::generate`] runs one attempt: encode the upload, compile the
//! prompt, call the model once, pick the first returned image. Every outcome,
//! including transport failures, comes back as a [`GenerationResult`] value.

use crate::codec::{self, DecodedImage};
use crate::error::GenerationFailure;
use crate::ports::image_model::{ImageModel, Modality, ModelRequest};
use crate::prompt::compile_selection;
use crate::style::{StyleAxis, StyleSelection};

/// A successfully generated headshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedHeadshot {
    /// The returned image, tagged with the MIME type the model reported.
    pub image: DecodedImage,
    /// The prompt exactly as it was submitted.
    pub prompt: String,
}

/// Outcome of one generation.
pub type GenerationResult = Result<GeneratedHeadshot, GenerationFailure>;

/// Drives single-attempt generations against an [`ImageModel`].
pub struct Orchestrator {
    model: Box<dyn ImageModel>,
    model_name: String,
}

impl Orchestrator {
    /// Create an orchestrator that submits to `model_name` through `model`.
    pub fn new(model: Box<dyn ImageModel>, model_name: impl Into<String>) -> Self {
        Self { model, model_name: model_name.into() }
    }

    /// The model identifier requests are sent to.
    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Generate a headshot from `image` styled by `selection`.
    ///
    /// Steps run strictly in order (encode, compile, submit, decode) with a
    /// single await on the model call. The cause of any failure is logged
    /// and reduced to a [`GenerationFailure`]; nothing else escapes.
    pub async fn generate(&self, image: &[u8], selection: StyleSelection) -> GenerationResult {
        let encoded = codec::encode(image).map_err(|e| {
            tracing::warn!(error = %e, "rejected uploaded image");
            GenerationFailure::InvalidImage
        })?;

        let prompt = compile_selection(&selection);
        tracing::debug!(
            pose = selection.pose.key(),
            framing = selection.framing.key(),
            outfit = selection.outfit.key(),
            prompt_len = prompt.len(),
            "compiled prompt"
        );

        let request = ModelRequest {
            model: self.model_name.clone(),
            image: encoded,
            prompt,
            response_modalities: vec![Modality::Image, Modality::Text],
        };

        let response = self.model.generate_content(&request).await.map_err(|e| {
            tracing::error!(model = %self.model_name, error = %e, "image model call failed");
            GenerationFailure::ServiceError
        })?;

        let Some(inline) = response.first_image() else {
            tracing::warn!(
                finish_reason = response.finish_reason.as_deref().unwrap_or("-"),
                block_reason = response.block_reason.as_deref().unwrap_or("-"),
                parts = response.parts.len(),
                "model returned no image"
            );
            let text = response.text();
            if !text.is_empty() {
                tracing::debug!(%text, "model text response");
            }
            return Err(GenerationFailure::NoImageProduced);
        };

        let image = codec::decode(&inline.data, &inline.mime_type).map_err(|e| {
            tracing::error!(error = %e, "model returned undecodable image data");
            GenerationFailure::ServiceError
        })?;

        tracing::info!(
            mime_type = %image.mime_type,
            bytes = image.bytes.len(),
            "headshot generated"
        );
        Ok(GeneratedHeadshot { image, prompt: request.prompt })
    }
}
