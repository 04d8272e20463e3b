//! Try-on image synthesis — face + garment → composite image, when the model produces one.

use tracing::{info, warn};

use crate::ai_client::{GenerateContentRequest, GenerativeModel, Part, IMAGE_MODEL};
use crate::assets::ImageAsset;
use crate::styling::prompts::TRY_ON_INSTRUCTION;

/// Asks the image model to dress the face reference in the garment.
/// Returns `None` on any failure or when the reply carries no image.
pub async fn synthesize_try_on(
    ai: &dyn GenerativeModel,
    face: &ImageAsset,
    garment: &ImageAsset,
) -> Option<ImageAsset> {
    let request = GenerateContentRequest::single_turn(vec![
        Part::text(TRY_ON_INSTRUCTION),
        Part::image(face),
        Part::image(garment),
    ]);

    let response = match ai.generate_content(IMAGE_MODEL, &request).await {
        Ok(response) => response,
        Err(e) => {
            warn!("Virtual try-on generation failed: {e}");
            return None;
        }
    };

    let Some(inline) = response.first_inline_image() else {
        warn!("Virtual try-on reply contained no image");
        return None;
    };

    match ImageAsset::from_base64(&inline.mime_type, &inline.data) {
        Ok(image) => {
            info!(
                "Virtual try-on image synthesized ({} bytes)",
                image.bytes().len()
            );
            Some(image)
        }
        Err(e) => {
            warn!("Virtual try-on image could not be decoded: {e}");
            None
        }
    }
}
