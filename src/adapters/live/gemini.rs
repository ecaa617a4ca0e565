//! Live adapter for the Gemini `generateContent` API.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::HeadshotError;
use crate::ports::image_model::{
    GenerateFuture, ImageModel, InlineImage, Modality, ModelRequest, ModelResponse, ResponsePart,
};

/// Default base URL of the Gemini models endpoint.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Longest slice of an error body kept in error messages.
const ERROR_BODY_LIMIT: usize = 500;

/// Live Gemini model that calls the Google AI API.
pub struct GeminiModel {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl GeminiModel {
    /// Create a new Gemini model client with the given API key.
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: GEMINI_API_BASE.to_string(),
            timeout: None,
        }
    }

    /// Point the client at a different endpoint (mock servers, proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Bound each request by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, HeadshotError> {
        self.client = Client::builder().timeout(timeout).build()?;
        self.timeout = Some(timeout);
        Ok(self)
    }

    /// The per-request timeout, if one was set.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl ImageModel for GeminiModel {
    fn generate_content(&self, request: &ModelRequest) -> GenerateFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let url = format!("{}/{}:generateContent", self.base_url, request.model);
            let body = GeminiRequest::from_model_request(&request);

            tracing::debug!(%url, model = %request.model, "submitting generateContent");

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                return Err(HeadshotError::Api {
                    status: status.as_u16(),
                    message: truncate(&response_text),
                });
            }

            let parsed: GeminiResponse = serde_json::from_str(&response_text).map_err(|e| {
                HeadshotError::MalformedResponse(format!("Failed to parse response: {e}"))
            })?;

            Ok(parsed.into_model_response())
        })
    }
}

fn truncate(body: &str) -> String {
    if body.chars().count() <= ERROR_BODY_LIMIT {
        return body.to_string();
    }
    let head: String = body.chars().take(ERROR_BODY_LIMIT).collect();
    format!("{head}...")
}

// --- Gemini API request types ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: [GeminiRequestContent<'a>; 1],
    generation_config: GeminiGenerationConfig,
}

#[derive(Serialize)]
struct GeminiRequestContent<'a> {
    parts: [GeminiRequestPart<'a>; 2],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum GeminiRequestPart<'a> {
    InlineData {
        #[serde(rename = "mimeType")]
        mime_type: &'a str,
        data: &'a str,
    },
    Text(&'a str),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    response_modalities: Vec<Modality>,
}

impl<'a> GeminiRequest<'a> {
    fn from_model_request(request: &'a ModelRequest) -> Self {
        Self {
            contents: [GeminiRequestContent {
                parts: [
                    GeminiRequestPart::InlineData {
                        mime_type: &request.image.mime_type,
                        data: &request.image.data,
                    },
                    GeminiRequestPart::Text(&request.prompt),
                ],
            }],
            generation_config: GeminiGenerationConfig {
                response_modalities: request.response_modalities.clone(),
            },
        }
    }
}

// --- Gemini API response types ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    text: Option<String>,
    inline_data: Option<GeminiInlineData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

impl GeminiResponse {
    /// Flatten to the first candidate; later candidates are ignored.
    fn into_model_response(self) -> ModelResponse {
        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);
        let Some(candidate) = self.candidates.into_iter().next() else {
            return ModelResponse { block_reason, ..ModelResponse::default() };
        };

        let parts = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .map(|part| ResponsePart {
                text: part.text,
                inline_data: part
                    .inline_data
                    .map(|inline| InlineImage { mime_type: inline.mime_type, data: inline.data }),
            })
            .collect();

        ModelResponse { parts, finish_reason: candidate.finish_reason, block_reason }
    }
}
