use axum::extract::State;
use axum::Json;
use teamlens_llm::MessagesRequest;

use crate::error::AppError;
use crate::prompts;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct ChatBody {
    #[serde(default)]
    pub message: String,
}

/// POST /api/chat — one-shot collaboration question. The whole directory
/// rides along as the system prompt so advice covers newly onboarded
/// members too.
pub async fn chat(
    State(app): State<AppState>,
    Json(body): Json<ChatBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    if body.message.is_empty() {
        return Err(AppError::bad_request("Message is required"));
    }
    let llm = app.llm()?;

    let directory = app.directory.clone();
    let members = tokio::task::spawn_blocking(move || directory.list_all())
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))?;

    let request = MessagesRequest::single(&app.config.model, app.config.chat_max_tokens, body.message)
        .with_system(prompts::chat_system(&members));
    let response = llm.complete(&request).await?;

    Ok(Json(serde_json::json!({ "response": response })))
}
