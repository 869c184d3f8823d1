use axum::extract::State;
use axum::Json;
use teamlens_core::error::TeamlensError;
use teamlens_llm::MessagesRequest;

use crate::error::AppError;
use crate::generation;
use crate::prompts;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct InsightsBody {
    #[serde(default)]
    pub email: String,
}

/// POST /api/insights — rank teammates for one person (most similar, most
/// compatible, best communication match, growth partner). The reply is
/// parsed as JSON exactly once; unlike profile generation there is no
/// corrective retry.
pub async fn insights(
    State(app): State<AppState>,
    Json(body): Json<InsightsBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    if body.email.is_empty() {
        return Err(AppError::bad_request("Email is required"));
    }

    let directory = app.directory.clone();
    let email = body.email.clone();
    let (current, all) = tokio::task::spawn_blocking(move || {
        (directory.find_by_email(&email), directory.list_all())
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))?;

    let current = current.ok_or_else(|| AppError::not_found("Profile not found"))?;
    let teammates: Vec<_> = all
        .into_iter()
        .filter(|m| m.email_key() != body.email.to_lowercase())
        .collect();
    if teammates.is_empty() {
        return Err(AppError::bad_request(
            "No teammates found to compare against",
        ));
    }
    let llm = app.llm()?;

    let request = MessagesRequest::single(
        &app.config.model,
        app.config.chat_max_tokens,
        prompts::insights(&current, &teammates),
    );
    let raw = llm.complete(&request).await?;
    let insights = generation::parse_json_lenient(&raw).ok_or_else(|| {
        AppError(TeamlensError::Generation("insights response was not valid JSON".into()).into())
    })?;

    Ok(Json(serde_json::json!({ "insights": insights })))
}
