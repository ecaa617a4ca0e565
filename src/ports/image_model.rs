//! Image model port: one multimodal request in, response parts out.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::codec::EncodedImage;
use crate::error::HeadshotError;

/// Output modality the model is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modality {
    /// Inline image data.
    Image,
    /// Plain text.
    Text,
}

/// A request to restyle an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRequest {
    /// The resolved model identifier (e.g., `"gemini-2.5-flash-image-preview"`).
    pub model: String,
    /// The source image, sent as the first content part.
    pub image: EncodedImage,
    /// The compiled prompt, sent as the second content part.
    pub prompt: String,
    /// Modalities the response may contain.
    pub response_modalities: Vec<Modality>,
}

/// Inline image data as returned by the model (still base64).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineImage {
    /// MIME type reported by the model.
    pub mime_type: String,
    /// Base64 image data.
    pub data: String,
}

/// One content part of the model's answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsePart {
    /// Text commentary, if this is a text part.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Image payload, if this is an image part.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineImage>,
}

/// Content parts of the first candidate, in the order the model sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelResponse {
    /// Ordered content parts.
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
    /// Why the model stopped, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    /// Why the prompt was blocked, when it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
}

impl ModelResponse {
    /// The first part carrying inline image data.
    #[must_use]
    pub fn first_image(&self) -> Option<&InlineImage> {
        self.parts.iter().find_map(|part| part.inline_data.as_ref())
    }

    /// All text parts joined by newlines.
    #[must_use]
    pub fn text(&self) -> String {
        self.parts.iter().filter_map(|part| part.text.as_deref()).collect::<Vec<_>>().join("\n")
    }
}

/// Boxed future type returned by [`ImageModel::generate_content`].
pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ModelResponse, HeadshotError>> + Send + 'a>>;

/// A remote generative model that takes an image and a prompt.
pub trait ImageModel: Send + Sync {
    /// Submit one request and return the first candidate's parts.
    fn generate_content(&self, request: &ModelRequest) -> GenerateFuture<'_>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_part(data: &str) -> ResponsePart {
        ResponsePart {
            text: None,
            inline_data: Some(InlineImage { mime_type: "image/png".into(), data: data.into() }),
        }
    }

    fn text_part(text: &str) -> ResponsePart {
        ResponsePart { text: Some(text.into()), inline_data: None }
    }

    #[test]
    fn first_image_skips_text_parts() {
        let response = ModelResponse {
            parts: vec![text_part("here you go"), image_part("AAAA"), image_part("BBBB")],
            ..ModelResponse::default()
        };
        assert_eq!(response.first_image().unwrap().data, "AAAA");
    }

    #[test]
    fn first_image_none_for_text_only() {
        let response =
            ModelResponse { parts: vec![text_part("sorry")], ..ModelResponse::default() };
        assert!(response.first_image().is_none());
        assert_eq!(response.text(), "sorry");
    }

    #[test]
    fn modality_serializes_upper_case() {
        let json = serde_json::to_string(&[Modality::Image, Modality::Text]).unwrap();
        assert_eq!(json, r#"["IMAGE","TEXT"]"#);
    }

    #[test]
    fn response_parts_deserialize_with_missing_fields() {
        let response: ModelResponse =
            serde_json::from_str(r#"{"parts":[{"text":"hi"},{}]}"#).unwrap();
        assert_eq!(response.parts.len(), 2);
        assert!(response.finish_reason.is_none());
        assert!(response.first_image().is_none());
    }
}
