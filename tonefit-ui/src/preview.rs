//! Local image preview
//!
//! Builds the `data:` URI shown next to the analysis result. Built entirely
//! from the local bytes; never waits on the network.

use base64::{engine::general_purpose, Engine as _};

const FALLBACK_MIME: &str = "application/octet-stream";

/// Encode `bytes` as a base64 data URI
///
/// The MIME type is sniffed from the content first, then taken from
/// `declared`, then falls back to `application/octet-stream`.
pub fn data_uri(bytes: &[u8], declared: Option<&str>) -> String {
    let mime = infer::get(bytes)
        .map(|kind| kind.mime_type())
        .or(declared.filter(|m| !m.is_empty()))
        .unwrap_or(FALLBACK_MIME);

    format!("data:{};base64,{}", mime, general_purpose::STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG_HEADER: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];

    #[test]
    fn test_sniffed_mime_wins() {
        let uri = data_uri(&JPEG_HEADER, Some("image/png"));
        assert_eq!(uri, "data:image/jpeg;base64,/9j/4A==");
    }

    #[test]
    fn test_declared_mime_used_when_unknown() {
        let uri = data_uri(b"abc", Some("image/heic"));
        assert_eq!(uri, "data:image/heic;base64,YWJj");
    }

    #[test]
    fn test_fallback_mime() {
        assert_eq!(data_uri(b"abc", None), "data:application/octet-stream;base64,YWJj");
        assert_eq!(data_uri(b"", Some("")), "data:application/octet-stream;base64,");
    }
}
