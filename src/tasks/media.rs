//! Media Payloads
//!
//! Raw bytes plus declared media type, encoded inline for the service.

use crate::api::Part;
use crate::error::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use std::path::Path;

/// Media type assumed for recorded audio that arrives without one
pub const DEFAULT_AUDIO_MIME: &str = "audio/webm";

/// Media type of PDF documents
pub const PDF_MIME: &str = "application/pdf";

/// Bytes and their declared media type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPayload {
    data: Bytes,
    mime_type: String,
}

impl MediaPayload {
    /// Create a payload with an explicit media type
    pub fn new(data: impl Into<Bytes>, mime_type: impl Into<String>) -> Self {
        let mime_type: String = mime_type.into();
        Self {
            data: data.into(),
            mime_type: mime_type.trim().to_ascii_lowercase(),
        }
    }

    /// Recorded audio; a blank media type falls back to `audio/webm`
    pub fn audio(data: impl Into<Bytes>, mime_type: impl Into<String>) -> Self {
        let mut payload = Self::new(data, mime_type);
        if payload.mime_type.is_empty() {
            payload.mime_type = DEFAULT_AUDIO_MIME.to_string();
        }
        payload
    }

    /// Read a file, taking the media type from `mime_type` or the file extension
    pub fn from_path(path: impl AsRef<Path>, mime_type: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let mime_type = match mime_type {
            Some(m) => m.to_string(),
            None => guess_mime_type(path).unwrap_or_default().to_string(),
        };
        Ok(Self::new(data, mime_type))
    }

    /// Declared media type (lowercase, may be empty)
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Raw bytes
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Whether this is an image or a PDF document
    pub fn is_image_or_pdf(&self) -> bool {
        self.mime_type.starts_with("image/") || self.mime_type == PDF_MIME
    }

    /// Base64 inline part for a request
    pub fn to_part(&self) -> Part {
        Part::inline(self.mime_type.clone(), STANDARD.encode(&self.data))
    }
}

/// Media type for common clinic upload extensions
pub fn guess_mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "webm" => "audio/webm",
        "ogg" | "oga" => "audio/ogg",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "m4a" => "audio/mp4",
        "flac" => "audio/flac",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "pdf" => PDF_MIME,
        "txt" => "text/plain",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_audio_defaults_mime() {
        let payload = MediaPayload::audio(vec![1u8, 2, 3], "");
        assert_eq!(payload.mime_type(), "audio/webm");

        let payload = MediaPayload::audio(vec![1u8], "audio/ogg");
        assert_eq!(payload.mime_type(), "audio/ogg");
    }

    #[test]
    fn test_image_or_pdf() {
        assert!(MediaPayload::new(vec![0u8], "image/png").is_image_or_pdf());
        assert!(MediaPayload::new(vec![0u8], "Application/PDF").is_image_or_pdf());
        assert!(!MediaPayload::new(vec![0u8], "text/plain").is_image_or_pdf());
        assert!(!MediaPayload::new(vec![0u8], "").is_image_or_pdf());
        assert!(!MediaPayload::new(vec![0u8], "application/pdfx").is_image_or_pdf());
    }

    #[test]
    fn test_to_part_encodes_base64() {
        let part = MediaPayload::new(b"hello".to_vec(), "audio/webm").to_part();
        match part {
            Part::InlineData { inline_data } => {
                assert_eq!(inline_data.mime_type, "audio/webm");
                assert_eq!(inline_data.data, "aGVsbG8=");
            }
            other => panic!("unexpected part: {:?}", other),
        }
    }

    #[test]
    fn test_from_path_guesses_mime() {
        let mut file = tempfile::Builder::new().suffix(".PDF").tempfile().unwrap();
        file.write_all(b"%PDF-1.4").unwrap();

        let payload = MediaPayload::from_path(file.path(), None).unwrap();
        assert_eq!(payload.mime_type(), "application/pdf");
        assert_eq!(&payload.data()[..], b"%PDF-1.4");

        let payload = MediaPayload::from_path(file.path(), Some("image/png")).unwrap();
        assert_eq!(payload.mime_type(), "image/png");
    }

    #[test]
    fn test_from_missing_path_is_io_error() {
        let result = MediaPayload::from_path("/no/such/recording.webm", None);
        assert!(matches!(result, Err(crate::error::ScribeError::Io(_))));
    }
}
