//! Recording adapter for the `ImageModel` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::image_model::{GenerateFuture, ImageModel, ModelRequest};

/// Placeholder written instead of the uploaded portrait.
const REDACTED_IMAGE: &str = "<redacted>";

/// Records model interactions while delegating to an inner implementation.
///
/// The uploaded image data is redacted from the recorded input; the prompt,
/// model and MIME type are kept.
pub struct RecordingImageModel {
    inner: Box<dyn ImageModel>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingImageModel {
    /// Creates a new recording model wrapping the given implementation.
    pub fn new(inner: Box<dyn ImageModel>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ImageModel for RecordingImageModel {
    fn generate_content(&self, request: &ModelRequest) -> GenerateFuture<'_> {
        let request = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.generate_content(&request).await;
            let mut recorded_input = request;
            recorded_input.image.data = REDACTED_IMAGE.to_string();
            record_result(&recorder, "image_model", "generate_content", &recorded_input, &result);
            result
        })
    }
}
