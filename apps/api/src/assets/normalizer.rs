//! Asset Normalizer — turns any image reference into an `ImageAsset`.
//!
//! Failures are logged and collapse to `None`; callers treat that as
//! "normalization failed" and never see the underlying error.

use std::time::Duration;

use bytes::{Bytes, BytesMut};
use reqwest::{header::CONTENT_TYPE, Client};
use tracing::{debug, warn};

use crate::assets::{AssetError, ImageAsset, ImageSource, MAX_IMAGE_BYTES};

#[derive(Clone)]
pub struct AssetNormalizer {
    client: Client,
    max_bytes: usize,
}

impl AssetNormalizer {
    pub fn new(timeout: Duration) -> Result<Self, AssetError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            max_bytes: MAX_IMAGE_BYTES,
        })
    }

    /// Caps how much of a remote body is read.
    #[cfg(test)]
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Normalizes a source sent by the view layer. Remote URLs are fetched
    /// and re-encoded; data URIs and bare payloads are decoded as-is.
    pub async fn normalize(&self, source: &ImageSource) -> Option<ImageAsset> {
        let result = match source {
            ImageSource::Url(url) => self.fetch(url).await,
            ImageSource::DataUri(uri) => ImageAsset::from_data_uri(uri),
            ImageSource::Base64(payload) => {
                ImageAsset::from_base64(crate::assets::DEFAULT_MIME_TYPE, payload)
            }
        };

        match result {
            Ok(asset) => Some(asset),
            Err(e) => {
                warn!("Image normalization failed: {e}");
                None
            }
        }
    }

    /// Normalizes bytes received from a local pick/drop upload.
    pub fn from_upload(content_type: Option<&str>, bytes: Bytes) -> Option<ImageAsset> {
        ImageAsset::from_bytes(content_type, bytes)
            .map_err(|e| warn!("Uploaded image rejected: {e}"))
            .ok()
    }

    async fn fetch(&self, url: &str) -> Result<ImageAsset, AssetError> {
        debug!("Fetching remote image {url}");
        let mut response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssetError::Status(status.as_u16()));
        }

        let too_large = || AssetError::TooLarge {
            limit: self.max_bytes,
        };
        if response
            .content_length()
            .is_some_and(|len| len > self.max_bytes as u64)
        {
            return Err(too_large());
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        // Chunked bodies carry no length up front; stop once past the cap.
        let mut body = BytesMut::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }

        ImageAsset::from_bytes(content_type.as_deref(), body.freeze())
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::header, routing::get, Router};

    use super::*;

    const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

    async fn spawn_image_server() -> String {
        let app = Router::new()
            .route(
                "/garment.jpg",
                get(|| async { ([(header::CONTENT_TYPE, "image/jpeg")], JPEG_BYTES) }),
            )
            .route(
                "/missing.jpg",
                get(|| async { (axum::http::StatusCode::NOT_FOUND, "gone") }),
            )
            .route(
                "/secrets.txt",
                get(|| async { ([(header::CONTENT_TYPE, "text/plain")], "aws_secret=hunter2") }),
            )
            .route(
                "/index.html",
                get(|| async { ([(header::CONTENT_TYPE, "text/html")], "<html>admin</html>") }),
            )
            .route(
                "/huge.png",
                get(|| async {
                    let mut body = vec![0x89, b'P', b'N', b'G'];
                    body.resize(4096, 0);
                    ([(header::CONTENT_TYPE, "image/png")], body)
                }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn normalizer() -> AssetNormalizer {
        AssetNormalizer::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_remote_url_becomes_data_uri() {
        let base = spawn_image_server().await;
        let source = ImageSource::from(format!("{base}/garment.jpg"));

        let asset = normalizer().normalize(&source).await.unwrap();

        assert!(asset.to_data_uri().starts_with("data:image/"));
        assert_eq!(asset.mime_type(), "image/jpeg");
        assert_eq!(asset.bytes().as_ref(), JPEG_BYTES);
    }

    #[tokio::test]
    async fn test_remote_failure_yields_none() {
        let base = spawn_image_server().await;
        let source = ImageSource::from(format!("{base}/missing.jpg"));

        assert!(normalizer().normalize(&source).await.is_none());
    }

    #[tokio::test]
    async fn test_non_image_response_yields_none() {
        let base = spawn_image_server().await;
        for path in ["secrets.txt", "index.html"] {
            let source = ImageSource::from(format!("{base}/{path}"));
            assert!(
                normalizer().normalize(&source).await.is_none(),
                "{path} was accepted as an image"
            );
        }
    }

    #[tokio::test]
    async fn test_body_over_the_cap_yields_none() {
        let base = spawn_image_server().await;
        let source = ImageSource::from(format!("{base}/huge.png"));

        assert!(normalizer()
            .with_max_bytes(1024)
            .normalize(&source)
            .await
            .is_none());
        assert!(normalizer()
            .with_max_bytes(8192)
            .normalize(&source)
            .await
            .is_some());
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_none() {
        let source = ImageSource::from("http://127.0.0.1:9/face.png");
        assert!(normalizer().normalize(&source).await.is_none());
    }

    #[tokio::test]
    async fn test_data_uri_is_used_as_is() {
        let uri = "data:image/png;base64,iVBORw0KGgo=";
        let asset = normalizer()
            .normalize(&ImageSource::from(uri))
            .await
            .unwrap();
        assert_eq!(asset.to_data_uri(), uri);
    }

    #[tokio::test]
    async fn test_garbage_data_uri_yields_none() {
        let source = ImageSource::from("data:image/png;base64,not base64!");
        assert!(normalizer().normalize(&source).await.is_none());
    }

    #[test]
    fn test_empty_upload_is_rejected() {
        assert!(AssetNormalizer::from_upload(Some("image/png"), Bytes::new()).is_none());
    }
}
