//! Replaying adapter for the `ImageModel` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::image_model::{GenerateFuture, ImageModel, ModelRequest, ModelResponse};

/// Serves recorded model responses from a cassette.
pub struct ReplayingImageModel {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingImageModel {
    /// Create a replaying model backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl ImageModel for ReplayingImageModel {
    fn generate_content(&self, _request: &ModelRequest) -> GenerateFuture<'_> {
        let output = next_output(&self.replayer, "image_model", "generate_content");
        Box::pin(async move { output.and_then(replay_result::<ModelResponse>) })
    }
}
