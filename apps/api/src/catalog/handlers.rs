use axum::{
    extract::{Path, Query},
    Json,
};
use serde::Deserialize;

use crate::catalog::{
    find_outfit, outfits_for, ColorShade, OutfitTemplate, SavedOutfit, COLOR_SHADES,
    SAVED_OUTFITS,
};
use crate::errors::AppError;
use crate::styling::models::Occasion;

#[derive(Deserialize)]
pub struct CatalogQuery {
    pub category: Option<Occasion>,
}

/// GET /api/v1/outfits
pub async fn handle_list_outfits(Query(params): Query<CatalogQuery>) -> Json<Vec<OutfitTemplate>> {
    Json(outfits_for(params.category))
}

/// GET /api/v1/outfits/:id
pub async fn handle_get_outfit(Path(id): Path<String>) -> Result<Json<OutfitTemplate>, AppError> {
    find_outfit(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Outfit {id} not found")))
}

/// GET /api/v1/saved-outfits
pub async fn handle_list_saved_outfits() -> Json<&'static [SavedOutfit]> {
    Json(SAVED_OUTFITS)
}

/// GET /api/v1/color-shades
pub async fn handle_list_color_shades() -> Json<&'static [ColorShade]> {
    Json(COLOR_SHADES)
}
