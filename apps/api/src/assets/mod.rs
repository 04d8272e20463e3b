//! Image assets — the single encoded-binary form every pipeline stage consumes.
//!
//! Face photos, garment photos and synthesized images all travel as an
//! `ImageAsset` and cross the HTTP boundary as `data:` URIs.

pub mod handlers;
pub mod normalizer;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

pub use normalizer::AssetNormalizer;

/// MIME type assumed for a bare base64 payload.
pub const DEFAULT_MIME_TYPE: &str = "image/png";

/// Largest image accepted from an upload or a remote fetch.
pub const MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Malformed data URI: {0}")]
    InvalidDataUri(String),

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Image payload is empty")]
    Empty,

    #[error("Payload is not an image (declared type: {0})")]
    NotAnImage(String),

    #[error("Image exceeds the {limit} byte limit")]
    TooLarge { limit: usize },

    #[error("Fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Fetch returned status {0}")]
    Status(u16),
}

/// Encoded image bytes plus MIME type. Immutable; replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    mime_type: String,
    bytes: Bytes,
}

impl ImageAsset {
    pub fn new(mime_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Builds an asset from raw bytes. The type comes from the magic bytes,
    /// else from `declared` when that is an `image/*` type. Anything else is
    /// rejected.
    pub fn from_bytes(declared: Option<&str>, bytes: Bytes) -> Result<Self, AssetError> {
        if bytes.is_empty() {
            return Err(AssetError::Empty);
        }
        let mime_type = sniff_mime_type(&bytes)
            .map(str::to_string)
            .or_else(|| declared.and_then(image_mime))
            .ok_or_else(|| AssetError::NotAnImage(declared.unwrap_or("none").to_string()))?;
        Ok(Self::new(mime_type, bytes))
    }

    /// Decodes `data:<mime>;base64,<payload>`.
    pub fn from_data_uri(uri: &str) -> Result<Self, AssetError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| AssetError::InvalidDataUri("missing data: prefix".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| AssetError::InvalidDataUri("missing ',' separator".to_string()))?;
        let mime = header.strip_suffix(";base64").ok_or_else(|| {
            AssetError::InvalidDataUri("only base64 data URIs are supported".to_string())
        })?;
        let mime = if mime.trim().is_empty() {
            DEFAULT_MIME_TYPE
        } else {
            mime.trim()
        };
        Self::from_base64(mime, payload)
    }

    /// Decodes a bare base64 payload with a known MIME type.
    pub fn from_base64(mime_type: &str, payload: &str) -> Result<Self, AssetError> {
        let bytes = STANDARD.decode(payload.trim())?;
        if bytes.is_empty() {
            return Err(AssetError::Empty);
        }
        Ok(Self::new(mime_type, bytes))
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn base64_payload(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_payload())
    }
}

impl Serialize for ImageAsset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_data_uri())
    }
}

/// Where an image comes from, as sent by the view layer.
///
/// Deserializes from a plain string: `http(s)://` is a remote URL,
/// `data:` a data URI, anything else a bare base64 payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ImageSource {
    Url(String),
    DataUri(String),
    Base64(String),
}

impl From<String> for ImageSource {
    fn from(raw: String) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            ImageSource::Url(trimmed.to_string())
        } else if trimmed.starts_with("data:") {
            ImageSource::DataUri(trimmed.to_string())
        } else {
            ImageSource::Base64(trimmed.to_string())
        }
    }
}

impl From<&str> for ImageSource {
    fn from(raw: &str) -> Self {
        ImageSource::from(raw.to_string())
    }
}

fn image_mime(content_type: &str) -> Option<String> {
    let mime = content_type.split(';').next()?.trim().to_ascii_lowercase();
    mime.starts_with("image/").then_some(mime)
}

/// Recognizes the formats the try-on flow sees in practice.
fn sniff_mime_type(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF8") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_data_uri_round_trip_keeps_mime() {
        let asset = ImageAsset::new("image/jpeg", vec![0xFF, 0xD8, 0xFF, 0x00]);
        let uri = asset.to_data_uri();
        assert!(uri.starts_with("data:image/jpeg;base64,"));
        assert_eq!(ImageAsset::from_data_uri(&uri).unwrap(), asset);
    }

    #[test]
    fn test_data_uri_without_base64_marker_is_rejected() {
        let err = ImageAsset::from_data_uri("data:image/png,rawbytes").unwrap_err();
        assert!(matches!(err, AssetError::InvalidDataUri(_)));
    }

    #[test]
    fn test_data_uri_with_bad_payload_is_rejected() {
        let err = ImageAsset::from_data_uri("data:image/png;base64,@@@").unwrap_err();
        assert!(matches!(err, AssetError::Base64(_)));
    }

    #[test]
    fn test_from_bytes_prefers_sniffed_type() {
        let asset =
            ImageAsset::from_bytes(Some("application/octet-stream"), Bytes::from_static(PNG_HEADER))
                .unwrap();
        assert_eq!(asset.mime_type(), "image/png");
    }

    #[test]
    fn test_from_bytes_uses_declared_image_type_when_unknown() {
        let asset =
            ImageAsset::from_bytes(Some("image/avif; q=1"), Bytes::from_static(b"....")).unwrap();
        assert_eq!(asset.mime_type(), "image/avif");
    }

    #[test]
    fn test_from_bytes_rejects_non_image_payloads() {
        let text = ImageAsset::from_bytes(Some("text/plain"), Bytes::from_static(b"aws_secret=x"));
        assert!(matches!(text, Err(AssetError::NotAnImage(ref t)) if t == "text/plain"));

        let undeclared = ImageAsset::from_bytes(None, Bytes::from_static(b"<html></html>"));
        assert!(matches!(undeclared, Err(AssetError::NotAnImage(_))));
    }

    #[test]
    fn test_from_bytes_rejects_empty() {
        assert!(matches!(
            ImageAsset::from_bytes(None, Bytes::new()),
            Err(AssetError::Empty)
        ));
    }

    #[test]
    fn test_image_source_classification() {
        assert_eq!(
            ImageSource::from("https://images.example.com/a.jpg"),
            ImageSource::Url("https://images.example.com/a.jpg".to_string())
        );
        assert!(matches!(
            ImageSource::from("data:image/png;base64,AA=="),
            ImageSource::DataUri(_)
        ));
        assert!(matches!(ImageSource::from("iVBORw0KGgo="), ImageSource::Base64(_)));
    }

    #[test]
    fn test_asset_serializes_as_data_uri() {
        let asset = ImageAsset::new("image/png", vec![1u8, 2, 3]);
        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(json, serde_json::json!("data:image/png;base64,AQID"));
    }
}
