//! Axum route handlers for the Try-On API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::assets::handlers::read_image_field;
use crate::assets::{ImageAsset, ImageSource};
use crate::catalog::find_outfit;
use crate::errors::AppError;
use crate::state::AppState;
use crate::styling::assembler::TryOnView;
use crate::styling::dispatcher::{dispatch, run_generation, TryOnInputs};
use crate::styling::models::{Measurements, MeasurementsPatch, Occasion, SkinTone};
use crate::styling::session::{SessionView, TryOnSession};

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TryOnRequest {
    pub face: ImageSource,
    pub garment: ImageSource,
    pub measurements: Option<Measurements>,
    pub skin_tone: Option<SkinTone>,
    #[serde(default)]
    pub occasion: Occasion,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CreateSessionRequest {
    /// Initial garment, e.g. a catalog image URL.
    pub garment: Option<ImageSource>,
    /// Catalog outfit to start from; its image becomes the garment.
    pub outfit_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSessionRequest {
    pub measurements: Option<MeasurementsPatch>,
    pub skin_tone: Option<SkinTone>,
    pub occasion: Option<Occasion>,
}

#[derive(Debug, Deserialize)]
pub struct SetAssetRequest {
    pub source: ImageSource,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetSlot {
    Face,
    Garment,
}

impl AssetSlot {
    fn apply(self, session: &mut TryOnSession, asset: ImageAsset) {
        match self {
            AssetSlot::Face => session.set_face(asset),
            AssetSlot::Garment => session.set_garment(asset),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/try-on
///
/// One-shot pipeline: normalize both images, dispatch, assemble.
/// Omitted measurements and skin tone come from the profile.
pub async fn handle_try_on(
    State(state): State<AppState>,
    Json(request): Json<TryOnRequest>,
) -> Result<Json<TryOnView>, AppError> {
    let (face, garment) = tokio::join!(
        state.assets.normalize(&request.face),
        state.assets.normalize(&request.garment),
    );
    let face = face
        .ok_or_else(|| AppError::UnprocessableEntity("Face image could not be loaded".to_string()))?;
    let garment = garment.ok_or_else(|| {
        AppError::UnprocessableEntity("Garment image could not be loaded".to_string())
    })?;

    let profile = state.profile.get().await;
    let inputs = TryOnInputs {
        face,
        garment,
        measurements: request
            .measurements
            .unwrap_or(profile.default_measurements),
        skin_tone: request.skin_tone.unwrap_or(profile.skin_tone),
        occasion: request.occasion,
    };

    let result = dispatch(state.ai.as_ref(), &inputs).await;
    Ok(Json(TryOnView::from(&result)))
}

/// POST /api/v1/try-on/sessions
///
/// Body `{}` starts an empty session; a malformed body is rejected.
pub async fn handle_create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let garment_source = initial_garment(request)?;

    let profile = state.profile.get().await;
    let mut session = TryOnSession::new(profile.default_measurements, profile.skin_tone);

    // An initial garment that fails to load leaves the slot empty.
    if let Some(source) = garment_source {
        if let Some(garment) = state.assets.normalize(&source).await {
            session.set_garment(garment);
        }
    }

    let view = session.view();
    let id = state.sessions.insert(session).await;
    info!("Try-on session {id} opened");

    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/try-on/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    state
        .sessions
        .get(id)
        .await
        .map(|s| Json(s.view()))
        .ok_or_else(|| session_not_found(id))
}

/// DELETE /api/v1/try-on/sessions/:id
///
/// Called when the view unmounts. An in-flight generation finishes and is dropped.
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(id))
    }
}

/// PATCH /api/v1/try-on/sessions/:id
pub async fn handle_update_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSessionRequest>,
) -> Result<Json<SessionView>, AppError> {
    state
        .sessions
        .update(id, |session| {
            if let Some(patch) = request.measurements {
                session.measurements.apply(patch);
            }
            if let Some(skin_tone) = request.skin_tone {
                session.skin_tone = skin_tone;
            }
            if let Some(occasion) = request.occasion {
                session.occasion = occasion;
            }
            session.view()
        })
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

/// PUT /api/v1/try-on/sessions/:id/assets/:slot
///
/// Sets the face or garment from a URL or data URI. On load failure the
/// session keeps its previous image.
pub async fn handle_set_asset(
    State(state): State<AppState>,
    Path((id, slot)): Path<(Uuid, AssetSlot)>,
    Json(request): Json<SetAssetRequest>,
) -> Result<Json<SessionView>, AppError> {
    if state.sessions.phase(id).await.is_none() {
        return Err(session_not_found(id));
    }

    let asset = state
        .assets
        .normalize(&request.source)
        .await
        .ok_or_else(|| AppError::UnprocessableEntity("Image could not be loaded".to_string()))?;

    store_asset(&state, id, slot, asset).await
}

/// POST /api/v1/try-on/sessions/:id/assets/:slot/upload
///
/// Multipart variant of `handle_set_asset`, field `file`.
pub async fn handle_upload_asset(
    State(state): State<AppState>,
    Path((id, slot)): Path<(Uuid, AssetSlot)>,
    mut multipart: Multipart,
) -> Result<Json<SessionView>, AppError> {
    let asset = read_image_field(&mut multipart, "file").await?;
    store_asset(&state, id, slot, asset).await
}

/// POST /api/v1/try-on/sessions/:id/generate
///
/// Moves the session to `avatar` and runs the pipeline in the background.
/// Poll the session until its phase is `result`.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let (ticket, view) = state
        .sessions
        .update(id, |session| {
            session
                .begin_generation()
                .map(|ticket| (ticket, session.view()))
        })
        .await
        .ok_or_else(|| session_not_found(id))??;

    info!(
        "Session {id} generation {} started (occasion: {})",
        ticket.generation_id, ticket.inputs.occasion
    );

    tokio::spawn(run_generation(
        state.ai.clone(),
        state.sessions.clone(),
        id,
        ticket,
    ));

    Ok((StatusCode::ACCEPTED, Json(view)))
}

async fn store_asset(
    state: &AppState,
    id: Uuid,
    slot: AssetSlot,
    asset: ImageAsset,
) -> Result<Json<SessionView>, AppError> {
    state
        .sessions
        .update(id, |session| {
            slot.apply(session, asset);
            session.view()
        })
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

/// A catalog outfit wins over an explicit garment source.
fn initial_garment(request: CreateSessionRequest) -> Result<Option<ImageSource>, AppError> {
    match request.outfit_id {
        Some(id) => find_outfit(&id)
            .map(|outfit| Some(ImageSource::Url(outfit.image.to_string())))
            .ok_or_else(|| AppError::NotFound(format!("Outfit {id} not found"))),
        None => Ok(request.garment),
    }
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Try-on session {id} not found"))
}
