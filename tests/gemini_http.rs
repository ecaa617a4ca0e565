//! Gemini adapter tests against a mock HTTP server.
//!
//! Response bodies follow the `generateContent` REST format:
//! https://ai.google.dev/api/generate-content

use std::io::Cursor;
use std::time::Duration;

use base64::Engine;
use headshot::adapters::live::gemini::GeminiModel;
use headshot::{Framing, GenerationFailure, Orchestrator, Outfit, Pose, StyleAxis, StyleSelection};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-2.5-flash-image-preview";
const ENDPOINT: &str = "/gemini-2.5-flash-image-preview:generateContent";

fn encode_image(format: image::ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::<u8>::new());
    image::DynamicImage::new_rgb8(5, 5).write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

fn orchestrator(base_url: &str) -> Orchestrator {
    let model = GeminiModel::new("test-api-key".into()).with_base_url(base_url);
    Orchestrator::new(Box::new(model), MODEL)
}

fn image_response(bytes: &[u8]) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [
                    {"text": "Here is the edited photo."},
                    {"inlineData": {
                        "mimeType": "image/png",
                        "data": base64::engine::general_purpose::STANDARD.encode(bytes)
                    }}
                ]
            },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": {"promptTokenCount": 1290, "totalTokenCount": 2580}
    })
}

#[tokio::test]
async fn submits_image_and_prompt_and_returns_first_image() {
    let server = MockServer::start().await;
    let generated = encode_image(image::ImageFormat::Png);

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_response(&generated)))
        .expect(1)
        .mount(&server)
        .await;

    let upload = encode_image(image::ImageFormat::Jpeg);
    let selection =
        StyleSelection { pose: Pose::Thinking, framing: Framing::FullBody, outfit: Outfit::Suit };
    let headshot = orchestrator(&server.uri()).generate(&upload, selection).await.unwrap();

    assert_eq!(headshot.image.bytes, generated);
    assert_eq!(headshot.image.mime_type, "image/png");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = requests[0].body_json().unwrap();
    let parts = &body["contents"][0]["parts"];

    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
    assert_eq!(
        parts[0]["inlineData"]["data"],
        base64::engine::general_purpose::STANDARD.encode(&upload)
    );

    let prompt = parts[1]["text"].as_str().unwrap();
    assert_eq!(prompt, headshot.prompt);
    assert!(prompt.contains(Pose::Thinking.fragment()));
    assert!(prompt.contains(Framing::FullBody.fragment()));
    assert!(prompt.contains(Outfit::Suit.fragment()));

    assert_eq!(body["generationConfig"]["responseModalities"], json!(["IMAGE", "TEXT"]));
}

#[tokio::test]
async fn text_only_response_is_no_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [{"text": "I can't help with editing this image."}]},
                "finishReason": "STOP"
            }]
        })))
        .mount(&server)
        .await;

    let upload = encode_image(image::ImageFormat::Png);
    let result = orchestrator(&server.uri()).generate(&upload, StyleSelection::default()).await;
    assert_eq!(result.unwrap_err(), GenerationFailure::NoImageProduced);
}

#[tokio::test]
async fn blocked_prompt_is_no_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"promptFeedback": {"blockReason": "SAFETY"}})),
        )
        .mount(&server)
        .await;

    let upload = encode_image(image::ImageFormat::Png);
    let result = orchestrator(&server.uri()).generate(&upload, StyleSelection::default()).await;
    assert_eq!(result.unwrap_err(), GenerationFailure::NoImageProduced);
}

#[tokio::test]
async fn server_error_is_generic_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": {"code": 500, "message": "Internal error encountered.", "status": "INTERNAL"}
        })))
        .mount(&server)
        .await;

    let upload = encode_image(image::ImageFormat::Png);
    let failure = orchestrator(&server.uri())
        .generate(&upload, StyleSelection::default())
        .await
        .unwrap_err();
    assert_eq!(failure, GenerationFailure::ServiceError);
    assert!(!failure.to_string().contains("Internal error encountered"));
}

#[tokio::test]
async fn malformed_body_is_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&server)
        .await;

    let upload = encode_image(image::ImageFormat::Png);
    let result = orchestrator(&server.uri()).generate(&upload, StyleSelection::default()).await;
    assert_eq!(result.unwrap_err(), GenerationFailure::ServiceError);
}

#[tokio::test]
async fn unreachable_service_is_service_error() {
    // Nothing listens on the discard port.
    let upload = encode_image(image::ImageFormat::Png);
    let result =
        orchestrator("http://127.0.0.1:9").generate(&upload, StyleSelection::default()).await;
    assert_eq!(result.unwrap_err(), GenerationFailure::ServiceError);
}

#[tokio::test]
async fn slow_response_past_timeout_is_service_error() {
    let server = MockServer::start().await;
    let generated = encode_image(image::ImageFormat::Png);
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(image_response(&generated))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let model = GeminiModel::new("test-api-key".into())
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(200))
        .unwrap();
    let orchestrator = Orchestrator::new(Box::new(model), MODEL);

    let upload = encode_image(image::ImageFormat::Png);
    let started = std::time::Instant::now();
    let result = orchestrator.generate(&upload, StyleSelection::default()).await;

    assert_eq!(result.unwrap_err(), GenerationFailure::ServiceError);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn invalid_upload_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let result =
        orchestrator(&server.uri()).generate(b"GIF? no", StyleSelection::default()).await;
    assert_eq!(result.unwrap_err(), GenerationFailure::InvalidImage);
}
