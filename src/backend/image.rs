//! Image intake - validates receipt photo payloads before upload.
//!
//! The web client re-encodes photos before submitting them; this module is
//! the server-side guard that the payload really is an image we can serve
//! back. It sniffs magic bytes only and never decodes pixels.

use crate::errors::{Error, Result};

/// A validated image payload ready for the object store.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Raw image bytes
    pub bytes: Vec<u8>,
    /// Normalized content type derived from the magic bytes
    pub content_type: &'static str,
    /// File extension matching the content type
    pub extension: &'static str,
}

/// Validates `bytes` as a supported image and normalizes its content type.
///
/// Supported formats are JPEG, PNG, and WebP. `declared_type` is only used
/// to improve the error message when sniffing fails; the stored content
/// type always comes from the bytes themselves.
pub fn prepare_image(bytes: Vec<u8>, declared_type: &str) -> Result<ImageUpload> {
    if bytes.is_empty() {
        return Err(Error::Conversion {
            message: "empty image payload".to_string(),
        });
    }

    let (content_type, extension) = sniff(&bytes).ok_or_else(|| Error::Conversion {
        message: format!("unrecognized image format (declared as {declared_type})"),
    })?;

    Ok(ImageUpload {
        bytes,
        content_type,
        extension,
    })
}

fn sniff(bytes: &[u8]) -> Option<(&'static str, &'static str)> {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some(("image/jpeg", "jpg"));
    }
    if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some(("image/png", "png"));
    }
    // RIFF....WEBP
    if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some(("image/webp", "webp"));
    }
    None
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_prepare_jpeg() {
        let upload = prepare_image(vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00], "image/jpeg").unwrap();
        assert_eq!(upload.content_type, "image/jpeg");
        assert_eq!(upload.extension, "jpg");
    }

    #[test]
    fn test_prepare_png() {
        let mut bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&[0, 0, 0, 13]);
        let upload = prepare_image(bytes, "image/png").unwrap();
        assert_eq!(upload.content_type, "image/png");
        assert_eq!(upload.extension, "png");
    }

    #[test]
    fn test_prepare_webp() {
        let mut bytes = b"RIFF".to_vec();
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        bytes.extend_from_slice(b"WEBP");
        let upload = prepare_image(bytes, "image/webp").unwrap();
        assert_eq!(upload.content_type, "image/webp");
    }

    #[test]
    fn test_declared_type_does_not_override_sniffing() {
        // A JPEG declared as PNG is still stored as JPEG
        let upload = prepare_image(vec![0xFF, 0xD8, 0xFF, 0xDB], "image/png").unwrap();
        assert_eq!(upload.content_type, "image/jpeg");
    }

    #[test]
    fn test_empty_payload_rejected() {
        let result = prepare_image(Vec::new(), "image/jpeg");
        assert!(matches!(result.unwrap_err(), Error::Conversion { .. }));
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result = prepare_image(b"not an image".to_vec(), "application/pdf");
        let err = result.unwrap_err();
        assert!(matches!(err, Error::Conversion { .. }));
        assert!(err.to_string().contains("application/pdf"));
    }
}
