//! Image codec at the model boundary: bytes to base64 text and back.

use std::io::Cursor;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::HeadshotError;

/// Default file name offered when saving a generated headshot.
pub const DEFAULT_DOWNLOAD_NAME: &str = "professional-profile-photo.png";

/// An image in transportable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    /// Standard base64 of the image bytes.
    pub data: String,
    /// Detected MIME type (e.g. `"image/jpeg"`).
    pub mime_type: String,
}

/// A decoded, displayable image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Raw image bytes.
    pub bytes: Vec<u8>,
    /// MIME type the image was tagged with.
    pub mime_type: String,
}

impl DecodedImage {
    /// Render as a `data:` URL suitable for an `<img src>`.
    #[must_use]
    pub fn data_url(&self) -> String {
        let b64 = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{b64}", self.mime_type)
    }

    /// File name to use when the caller does not choose one.
    #[must_use]
    pub fn default_file_name(&self) -> &'static str {
        DEFAULT_DOWNLOAD_NAME
    }
}

/// Encode uploaded image bytes for the model request.
///
/// Only PNG and JPEG are accepted, and the header must be readable.
///
/// # Errors
///
/// Returns [`HeadshotError::InvalidImage`] if the bytes are not a readable
/// PNG or JPEG image.
pub fn encode(bytes: &[u8]) -> Result<EncodedImage, HeadshotError> {
    let mime_type = detect_mime(bytes)?;

    let (width, height) = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| HeadshotError::InvalidImage(format!("Failed to read image: {e}")))?
        .into_dimensions()
        .map_err(|e| HeadshotError::InvalidImage(format!("Failed to decode image: {e}")))?;
    if width == 0 || height == 0 {
        return Err(HeadshotError::InvalidImage(format!("Image has no pixels ({width}x{height})")));
    }

    tracing::debug!(mime_type, width, height, bytes = bytes.len(), "encoded input image");

    Ok(EncodedImage {
        data: base64::engine::general_purpose::STANDARD.encode(bytes),
        mime_type: mime_type.to_string(),
    })
}

/// Decode base64 image text back into bytes, keeping its MIME type.
///
/// # Errors
///
/// Returns [`HeadshotError::MalformedResponse`] if `text` is not valid base64.
pub fn decode(text: &str, mime_type: &str) -> Result<DecodedImage, HeadshotError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(text)
        .map_err(|e| HeadshotError::MalformedResponse(format!("Failed to decode base64: {e}")))?;
    Ok(DecodedImage { bytes, mime_type: mime_type.to_string() })
}

fn detect_mime(bytes: &[u8]) -> Result<&'static str, HeadshotError> {
    if bytes.is_empty() {
        return Err(HeadshotError::InvalidImage("File is empty".into()));
    }
    match image::guess_format(bytes) {
        Ok(image::ImageFormat::Png) => Ok("image/png"),
        Ok(image::ImageFormat::Jpeg) => Ok("image/jpeg"),
        Ok(other) => Err(HeadshotError::InvalidImage(format!(
            "Unsupported format {other:?}; use PNG or JPEG"
        ))),
        Err(e) => Err(HeadshotError::InvalidImage(format!("Unrecognized image data: {e}"))),
    }
}
