use std::fmt;
use std::sync::OnceLock;

use base64::{engine::general_purpose, Engine as _};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// An image carried as a self-contained `data:` URI.
///
/// The URI can be dropped straight into an `<img src>` attribute, which is
/// how the logo and signatures are displayed and printed. Only base64 image
/// URIs are accepted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageBlob {
    uri: String,
}

fn data_uri_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^data:(image/[A-Za-z0-9.+-]+)(?:;[A-Za-z0-9=._-]+)*;base64,([A-Za-z0-9+/]+={0,2})$")
            .expect("data uri pattern is valid")
    })
}

impl ImageBlob {
    /// Encode raw file bytes. `mime` is the type the browser reported for the file.
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Result<Self, StoreError> {
        let mime = mime.trim().to_ascii_lowercase();
        if !mime.starts_with("image/") || mime.len() == "image/".len() {
            return Err(StoreError::FileRead(format!(
                "`{}` is not an image type",
                if mime.is_empty() { "unknown" } else { mime.as_str() }
            )));
        }
        if bytes.is_empty() {
            return Err(StoreError::FileRead("file is empty".to_string()));
        }
        let payload = general_purpose::STANDARD.encode(bytes);
        Ok(Self {
            uri: format!("data:{};base64,{}", mime, payload),
        })
    }

    /// Validate a stored URI.
    pub fn parse(uri: &str) -> Result<Self, StoreError> {
        let uri = uri.trim();
        if data_uri_re().is_match(uri) {
            Ok(Self {
                uri: uri.to_string(),
            })
        } else {
            Err(StoreError::FileRead("not a base64 image data URI".to_string()))
        }
    }

    pub fn as_uri(&self) -> &str {
        &self.uri
    }

    pub fn mime_type(&self) -> &str {
        data_uri_re()
            .captures(&self.uri)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .unwrap_or_default()
    }

    /// Decoded size of the image in bytes.
    pub fn byte_len(&self) -> usize {
        let payload = self.uri.rsplit(',').next().unwrap_or_default();
        let padding = payload.bytes().rev().take_while(|b| *b == b'=').count();
        (payload.len() * 3 / 4).saturating_sub(padding)
    }
}

impl TryFrom<String> for ImageBlob {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ImageBlob::parse(&value)
    }
}

impl From<ImageBlob> for String {
    fn from(blob: ImageBlob) -> Self {
        blob.uri
    }
}

impl fmt::Debug for ImageBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Payloads run to hundreds of kilobytes; keep logs readable.
        f.debug_struct("ImageBlob")
            .field("mime", &self.mime_type())
            .field("bytes", &self.byte_len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn encodes_bytes_as_data_uri() {
        let blob = ImageBlob::from_bytes("image/png", PNG_HEADER).unwrap();
        assert_eq!(blob.as_uri(), "data:image/png;base64,iVBORw0KGgo=");
        assert_eq!(blob.mime_type(), "image/png");
        assert_eq!(blob.byte_len(), PNG_HEADER.len());
    }

    #[test]
    fn rejects_non_image_files() {
        let err = ImageBlob::from_bytes("application/pdf", b"%PDF").unwrap_err();
        assert!(matches!(err, StoreError::FileRead(msg) if msg.contains("application/pdf")));
        assert!(ImageBlob::from_bytes("", b"x").is_err());
        assert!(ImageBlob::from_bytes("image/", b"x").is_err());
    }

    #[test]
    fn rejects_empty_files() {
        assert!(matches!(
            ImageBlob::from_bytes("image/jpeg", &[]),
            Err(StoreError::FileRead(_))
        ));
    }

    #[test]
    fn parses_browser_data_urls() {
        let blob = ImageBlob::parse("data:image/svg+xml;base64,PHN2Zy8+").unwrap();
        assert_eq!(blob.mime_type(), "image/svg+xml");

        assert!(ImageBlob::parse("data:text/plain;base64,aGk=").is_err());
        assert!(ImageBlob::parse("https://example.org/logo.png").is_err());
        assert!(ImageBlob::parse("data:image/png,raw").is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let blob = ImageBlob::parse("data:image/gif;base64,R0lG").unwrap();
        let json = serde_json::to_string(&blob).unwrap();
        assert_eq!(json, "\"data:image/gif;base64,R0lG\"");

        let bad: Result<ImageBlob, _> = serde_json::from_str("\"not an image\"");
        assert!(bad.is_err());
    }
}
