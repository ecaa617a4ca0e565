//! Error types for headshot.
//!
//! [`HeadshotError`] carries full detail and is what adapters and helpers
//! return. [`GenerationFailure`] is the short, user-facing contract that the
//! orchestrator hands to the presentation layer.

use thiserror::Error;

/// Errors that can occur while preparing or performing a generation.
#[derive(Debug, Error)]
pub enum HeadshotError {
    /// An API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The uploaded bytes are not a readable PNG or JPEG image.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// The model response could not be interpreted.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A recorded cassette could not serve the interaction.
    #[error("Cassette error: {0}")]
    Cassette(String),

    /// No API key configured for the model service.
    #[error("No API key for {provider}. Set {env_var} or add it to config file.")]
    MissingApiKey {
        /// The provider name.
        provider: String,
        /// The environment variable name.
        env_var: String,
    },
}

/// Why a generation did not produce a headshot.
///
/// Display strings are shown to users as-is. The underlying cause is only
/// ever logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GenerationFailure {
    /// The uploaded file is not a readable PNG or JPEG image.
    #[error("The uploaded file could not be read as a PNG or JPEG image.")]
    InvalidImage,

    /// The model answered, but without any image data.
    #[error("The model did not return an image. Please try again.")]
    NoImageProduced,

    /// Network, transport or remote-side failure.
    #[error("Failed to generate image due to an API error.")]
    ServiceError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_messages_are_generic() {
        let msg = GenerationFailure::ServiceError.to_string();
        assert_eq!(msg, "Failed to generate image due to an API error.");
        assert!(!msg.contains("500"));
    }

    #[test]
    fn failure_kinds_are_distinct() {
        assert_ne!(
            GenerationFailure::NoImageProduced.to_string(),
            GenerationFailure::ServiceError.to_string()
        );
        assert_ne!(
            GenerationFailure::InvalidImage.to_string(),
            GenerationFailure::NoImageProduced.to_string()
        );
    }

    #[test]
    fn api_error_display() {
        let err = HeadshotError::Api { status: 429, message: "quota".into() };
        assert_eq!(err.to_string(), "API error (429): quota");
    }
}
