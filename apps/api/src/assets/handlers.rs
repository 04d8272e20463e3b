//! Axum route handlers for the Asset API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::assets::{AssetNormalizer, ImageAsset, ImageSource};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    pub source: ImageSource,
}

#[derive(Debug, Serialize)]
pub struct NormalizedAsset {
    pub mime_type: String,
    pub size_bytes: usize,
    pub data_uri: String,
}

impl From<&ImageAsset> for NormalizedAsset {
    fn from(asset: &ImageAsset) -> Self {
        Self {
            mime_type: asset.mime_type().to_string(),
            size_bytes: asset.bytes().len(),
            data_uri: asset.to_data_uri(),
        }
    }
}

/// POST /api/v1/assets/normalize
///
/// Converts a URL or data URI into a data URI the view layer can keep.
pub async fn handle_normalize(
    State(state): State<AppState>,
    Json(request): Json<NormalizeRequest>,
) -> Result<Json<NormalizedAsset>, AppError> {
    let asset = state
        .assets
        .normalize(&request.source)
        .await
        .ok_or_else(|| AppError::UnprocessableEntity("Image could not be loaded".to_string()))?;
    Ok(Json(NormalizedAsset::from(&asset)))
}

/// POST /api/v1/assets/upload
///
/// Multipart upload, field `file`. Bytes are held in memory only.
pub async fn handle_upload(mut multipart: Multipart) -> Result<Json<NormalizedAsset>, AppError> {
    let asset = read_image_field(&mut multipart, "file").await?;
    Ok(Json(NormalizedAsset::from(&asset)))
}

/// Reads the named multipart field and normalizes it into an image.
pub async fn read_image_field(
    multipart: &mut Multipart,
    field_name: &str,
) -> Result<ImageAsset, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(field_name) {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        return AssetNormalizer::from_upload(content_type.as_deref(), bytes).ok_or_else(|| {
            AppError::UnprocessableEntity("Uploaded file is empty or unreadable".to_string())
        });
    }
    Err(AppError::Validation(format!(
        "Multipart field '{field_name}' is required"
    )))
}
