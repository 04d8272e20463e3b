//! Axum route handlers for the Profile API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::profile::{palette_for, Palette, UserProfile};
use crate::state::AppState;
use crate::styling::models::SkinTone;

/// GET /api/v1/profile
pub async fn handle_get_profile(State(state): State<AppState>) -> Json<UserProfile> {
    Json(state.profile.get().await)
}

/// PUT /api/v1/profile
///
/// Replaces the whole profile. New try-on sessions pick up its measurements
/// and skin tone; open sessions keep what they had.
pub async fn handle_put_profile(
    State(state): State<AppState>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<UserProfile>, AppError> {
    profile.validate().map_err(AppError::Validation)?;
    state.profile.replace(profile.clone()).await;
    Ok(Json(profile))
}

/// GET /api/v1/profile/palette
///
/// Recommended colours for the profile's skin tone.
pub async fn handle_get_palette(State(state): State<AppState>) -> Json<Palette> {
    Json(palette_for(state.profile.get().await.skin_tone))
}

/// GET /api/v1/palettes
pub async fn handle_list_palettes() -> Json<Vec<Palette>> {
    Json(SkinTone::ALL.into_iter().map(palette_for).collect())
}
