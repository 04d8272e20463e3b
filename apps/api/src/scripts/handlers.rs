//! Axum route handlers for the script workspace.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assistant::script::run_fashion_script;
use crate::errors::AppError;
use crate::scripts::ScriptFile;
use crate::state::AppState;

const IMPORT_FIELD: &str = "file";
const UNNAMED_IMPORT: &str = "imported.txt";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CreateScriptRequest {
    pub name: Option<String>,
    pub language: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateScriptRequest {
    pub name: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScriptRunResponse {
    pub script_id: String,
    pub name: String,
    pub output: String,
}

/// GET /api/v1/scripts
pub async fn handle_list_scripts(State(state): State<AppState>) -> Json<Vec<ScriptFile>> {
    Json(state.scripts.list().await)
}

/// POST /api/v1/scripts
pub async fn handle_create_script(
    State(state): State<AppState>,
    Json(request): Json<CreateScriptRequest>,
) -> (StatusCode, Json<ScriptFile>) {
    let file = state
        .scripts
        .create(request.name, request.language, request.content)
        .await;
    (StatusCode::CREATED, Json(file))
}

/// POST /api/v1/scripts/import
///
/// Multipart, field `file`. The content must be UTF-8 text.
pub async fn handle_import_script(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ScriptFile>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(IMPORT_FIELD) {
            continue;
        }
        let name = field.file_name().unwrap_or(UNNAMED_IMPORT).to_string();
        let content = field
            .text()
            .await
            .map_err(|e| AppError::UnprocessableEntity(format!("Script is not text: {e}")))?;

        let file = state.scripts.import(name, content).await;
        info!("Imported script {} as {}", file.name, file.language);
        return Ok((StatusCode::CREATED, Json(file)));
    }
    Err(AppError::Validation(format!(
        "Multipart field '{IMPORT_FIELD}' is required"
    )))
}

/// GET /api/v1/scripts/:id
pub async fn handle_get_script(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ScriptFile>, AppError> {
    Ok(Json(state.scripts.get(&id).await?))
}

/// PUT /api/v1/scripts/:id
pub async fn handle_update_script(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateScriptRequest>,
) -> Result<Json<ScriptFile>, AppError> {
    let file = state
        .scripts
        .update(&id, request.name, request.content)
        .await?;
    Ok(Json(file))
}

/// DELETE /api/v1/scripts/:id
pub async fn handle_delete_script(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.scripts.remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/scripts/:id/run
pub async fn handle_run_script_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ScriptRunResponse>, AppError> {
    let file = state.scripts.get(&id).await?;
    info!("Executing script {}", file.name);

    let output = run_fashion_script(state.ai.as_ref(), &file.content).await;
    Ok(Json(ScriptRunResponse {
        script_id: file.id,
        name: file.name,
        output,
    }))
}
