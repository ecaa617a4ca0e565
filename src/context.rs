//! Service context that bundles all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::gemini::GeminiModel;
use crate::adapters::recording::image_model::RecordingImageModel;
use crate::adapters::replaying::image_model::ReplayingImageModel;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::Config;
use crate::error::HeadshotError;
use crate::ports::ImageModel;

/// Environment variable naming a cassette to replay instead of calling Gemini.
pub const REPLAY_ENV: &str = "HEADSHOT_REPLAY";

/// Environment variable that turns on cassette recording (`1` or `true`).
pub const RECORD_ENV: &str = "HEADSHOT_REC";

/// Bundles all port trait objects into a single context.
pub struct ServiceContext {
    /// Image model port.
    pub model: Box<dyn ImageModel>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write cassette files to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the adapter is still alive or the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, HeadshotError> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| HeadshotError::Cassette("recording adapter still in use".into()))?
            .into_inner()
            .map_err(|e| HeadshotError::Cassette(format!("recorder lock poisoned: {e}")))?;
        if recorder.is_empty() {
            tracing::warn!("no model calls were made; writing an empty cassette");
        } else {
            tracing::debug!(interactions = recorder.len(), "writing cassette");
        }
        Ok(recorder.finish()?)
    }
}

impl ServiceContext {
    /// Create a live context talking to Gemini.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not configured or the HTTP client
    /// cannot be built.
    pub fn live(config: &Config) -> Result<Self, HeadshotError> {
        Ok(Self { model: Box::new(live_model(config)?) })
    }

    /// Create a recording context that wraps the live adapter with a recorder.
    ///
    /// # Errors
    ///
    /// Returns an error if the live context cannot be created.
    pub fn recording(config: &Config) -> Result<(Self, RecordingSession), HeadshotError> {
        let live = Self::live(config)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".headshot/cassettes")
            .join(&timestamp)
            .join("image_model.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-image_model"),
            get_commit_hash(),
        )));

        let model = RecordingImageModel::new(live.model, Arc::clone(&recorder));
        Ok((Self { model: Box::new(model) }, RecordingSession { recorder }))
    }

    /// Create a replaying context from a cassette file. No API key is needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, HeadshotError> {
        let replayer = Arc::new(Mutex::new(load_cassette(path)?));
        Ok(Self { model: Box::new(ReplayingImageModel::new(replayer)) })
    }

    /// Choose replay, recording or live mode from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected context cannot be created.
    pub fn from_env(config: &Config) -> Result<(Self, Option<RecordingSession>), HeadshotError> {
        if let Ok(cassette) = std::env::var(REPLAY_ENV) {
            tracing::info!(%cassette, "replaying model responses");
            return Ok((Self::replaying(Path::new(&cassette))?, None));
        }
        if std::env::var(RECORD_ENV).is_ok_and(|v| v == "1" || v == "true") {
            tracing::info!("recording model interactions");
            let (ctx, session) = Self::recording(config)?;
            return Ok((ctx, Some(session)));
        }
        Ok((Self::live(config)?, None))
    }
}

/// Build the Gemini adapter from the configured key and timeout.
fn live_model(config: &Config) -> Result<GeminiModel, HeadshotError> {
    let key = config.gemini_key().ok_or_else(|| HeadshotError::MissingApiKey {
        provider: "Gemini".into(),
        env_var: "GEMINI_API_KEY".into(),
    })?;
    let model = GeminiModel::new(key);
    match config.defaults.timeout() {
        Some(timeout) => model.with_timeout(timeout),
        None => Ok(model),
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
