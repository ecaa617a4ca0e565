//! Saving generated headshots to disk.

use std::path::{Path, PathBuf};

use crate::codec::DecodedImage;
use crate::error::HeadshotError;

/// Resolve the output path: explicit path, else the image's default name.
#[must_use]
pub fn resolve_output_path(explicit: Option<&str>, image: &DecodedImage) -> PathBuf {
    explicit.map_or_else(|| PathBuf::from(image.default_file_name()), PathBuf::from)
}

/// Write the image bytes unchanged.
///
/// The bytes are never re-encoded. A path whose extension does not match the
/// image's MIME type is written anyway, with a warning.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_image(image: &DecodedImage, output_path: &Path) -> Result<(), HeadshotError> {
    if let Some(ext) = output_path.extension().and_then(|e| e.to_str()) {
        if !extension_matches_mime(ext, &image.mime_type) {
            tracing::warn!(
                path = %output_path.display(),
                mime_type = %image.mime_type,
                "file extension does not match image type; saving original bytes"
            );
        }
    }
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, &image.bytes)?;
    Ok(())
}

fn extension_matches_mime(ext: &str, mime: &str) -> bool {
    matches!(
        (ext.to_ascii_lowercase().as_str(), mime),
        ("jpg" | "jpeg", "image/jpeg") | ("png", "image/png") | ("webp", "image/webp")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(mime: &str) -> DecodedImage {
        DecodedImage { bytes: vec![0x89, b'P', b'N', b'G'], mime_type: mime.into() }
    }

    #[test]
    fn resolve_explicit() {
        let path = resolve_output_path(Some("me-pro.jpg"), &image("image/png"));
        assert_eq!(path, PathBuf::from("me-pro.jpg"));
    }

    #[test]
    fn resolve_default_is_png_name() {
        let path = resolve_output_path(None, &image("image/jpeg"));
        assert_eq!(path, PathBuf::from("professional-profile-photo.png"));
    }

    #[test]
    fn extension_matching() {
        assert!(extension_matches_mime("JPG", "image/jpeg"));
        assert!(extension_matches_mime("jpeg", "image/jpeg"));
        assert!(extension_matches_mime("png", "image/png"));
        assert!(!extension_matches_mime("png", "image/jpeg"));
    }

    #[test]
    fn save_writes_bytes_verbatim() {
        let dir = std::env::temp_dir().join("headshot_output_test");
        let path = dir.join("sub").join("out.jpg");
        let _ = std::fs::remove_dir_all(&dir);

        let img = image("image/png");
        save_image(&img, &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), img.bytes);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
