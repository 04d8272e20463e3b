//! Axum route handlers for the chat and script APIs.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::assistant::chat::{generate_fashion_advice, ChatMessage, ChatTurn, Role, GREETING};
use crate::assistant::script::run_fashion_script;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub history: Vec<ChatTurn>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ScriptRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ScriptResponse {
    pub output: String,
}

/// GET /api/v1/chat/greeting
///
/// The assistant's opening message for a fresh conversation.
pub async fn handle_chat_greeting() -> Json<ChatMessage> {
    Json(ChatMessage::new(Role::Model, GREETING))
}

/// POST /api/v1/chat
///
/// AI failures come back as a normal reply with fallback text.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatMessage>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let reply = generate_fashion_advice(state.ai.as_ref(), &request.history, &request.message).await;
    Ok(Json(reply))
}

/// POST /api/v1/scripts/run
pub async fn handle_run_script(
    State(state): State<AppState>,
    Json(request): Json<ScriptRequest>,
) -> Json<ScriptResponse> {
    let output = run_fashion_script(state.ai.as_ref(), &request.content).await;
    Json(ScriptResponse { output })
}
