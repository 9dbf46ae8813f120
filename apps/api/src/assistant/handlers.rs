use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assistant::build_prompt;
use crate::assistant::prompts::{QuickPrompt, QUICK_PROMPTS, SYSTEM_PROMPT};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub reply: String,
}

/// POST /api/v1/assistant/messages
pub async fn handle_message(
    State(state): State<AppState>,
    Json(req): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("message must not be empty".to_string()));
    }
    let backend = state.assistant.clone().ok_or(AppError::AssistantUnavailable)?;

    // Snapshot only; the lock is released before the backend call.
    let snapshot = state.store.lock().await.get_current();
    let prompt = build_prompt(message, snapshot.as_deref());

    info!(
        "Assistant request ({} chars, document: {})",
        message.len(),
        snapshot.as_ref().map_or_else(|| "none".to_string(), |d| d.id.to_string())
    );
    let reply = backend.complete(&prompt, SYSTEM_PROMPT).await?;
    Ok(Json(MessageResponse { reply }))
}

/// GET /api/v1/assistant/prompts
pub async fn handle_quick_prompts() -> Json<&'static [QuickPrompt]> {
    Json(&QUICK_PROMPTS[..])
}
