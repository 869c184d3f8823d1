use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use teamlens_core::{quiz, TeamMember};

use crate::error::AppError;
use crate::generation;
use crate::prompts;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /api/profile/generate
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    /// Question id → selected option label.
    pub answers: Option<BTreeMap<u32, String>>,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub user_image: Option<String>,
}

/// Turn quiz answers into a candidate profile. The result is returned to the
/// user for confirmation — nothing is persisted here.
pub async fn generate(
    State(app): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Some(answers) = body.answers else {
        return Err(AppError::bad_request(
            "answers, userName, and userEmail are required",
        ));
    };
    if body.user_name.is_empty() || body.user_email.is_empty() {
        return Err(AppError::bad_request(
            "answers, userName, and userEmail are required",
        ));
    }

    let llm = app.llm()?;
    let transcript = quiz::answers_transcript(&answers);
    let prompt = prompts::profile_generation(&body.user_name, &body.user_email, &transcript);

    let value = generation::generate_json(
        llm,
        &app.config.model,
        app.config.profile_max_tokens,
        &prompt,
    )
    .await?;

    let profile =
        TeamMember::from_generated(value, &body.user_name, &body.user_email, body.user_image)?;
    Ok(Json(serde_json::json!({ "profile": profile })))
}

// ---------------------------------------------------------------------------
// POST /api/profile
// ---------------------------------------------------------------------------

/// Persist a confirmed profile. Upsert keyed by email; a prior record for
/// the same email is fully replaced.
pub async fn save(
    State(app): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, AppError> {
    // Check identity keys on the raw value so an incomplete body gets a 400
    // with a usable message instead of a deserialization error.
    let has = |field: &str| {
        body.get(field)
            .and_then(|v| v.as_str())
            .is_some_and(|s| !s.trim().is_empty())
    };
    if !has("id") || !has("name") || !has("email") {
        return Err(AppError::bad_request(
            "Profile must include id, name, and email",
        ));
    }

    let profile: TeamMember = serde_json::from_value(body)
        .map_err(|e| AppError::bad_request(format!("invalid profile: {e}")))?;

    let directory = app.directory.clone();
    tokio::task::spawn_blocking(move || directory.save(&profile))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
    Ok(Json(serde_json::json!({ "success": true })))
}

// ---------------------------------------------------------------------------
// POST /api/profile/avatar
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize)]
pub struct AvatarBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar: String,
}

/// Rewrite a persisted profile with a new avatar.
pub async fn update_avatar(
    State(app): State<AppState>,
    Json(body): Json<AvatarBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    if body.email.is_empty() || body.avatar.is_empty() {
        return Err(AppError::bad_request("email and avatar are required"));
    }

    let directory = app.directory.clone();
    let updated =
        tokio::task::spawn_blocking(move || directory.update_avatar(&body.email, &body.avatar))
            .await
            .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
    Ok(Json(serde_json::json!({ "success": true, "profile": updated })))
}
