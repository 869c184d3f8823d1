use axum::extract::State;
use axum::Json;
use teamlens_llm::MessagesRequest;

use crate::error::AppError;
use crate::prompts;
use crate::state::AppState;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareBody {
    #[serde(default)]
    pub person_a_id: String,
    #[serde(default)]
    pub person_b_id: String,
}

/// POST /api/compare — narrative compatibility analysis for a pair. Both
/// members resolve through the directory, so persisted overrides are what
/// get compared.
pub async fn compare(
    State(app): State<AppState>,
    Json(body): Json<CompareBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    if body.person_a_id.is_empty() || body.person_b_id.is_empty() {
        return Err(AppError::bad_request("Both person IDs are required"));
    }
    let llm = app.llm()?;

    let directory = app.directory.clone();
    let (person_a, person_b) = tokio::task::spawn_blocking(move || {
        (
            directory.find_by_id(&body.person_a_id),
            directory.find_by_id(&body.person_b_id),
        )
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))?;

    let (Some(person_a), Some(person_b)) = (person_a, person_b) else {
        return Err(AppError::not_found("One or both team members not found"));
    };

    let request = MessagesRequest::single(
        &app.config.model,
        app.config.profile_max_tokens,
        prompts::comparison(&person_a, &person_b),
    );
    let comparison = llm.complete(&request).await?;

    Ok(Json(serde_json::json!({ "comparison": comparison })))
}
