use axum::extract::{Query, State};
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct MeQuery {
    #[serde(default)]
    pub email: Option<String>,
}

/// GET /api/me?email= — onboarding gate: does this email resolve to a
/// profile, and if so which one. A missing email is not an error, just "no
/// profile".
pub async fn get_me(
    State(app): State<AppState>,
    Query(query): Query<MeQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Some(email) = query.email.filter(|e| !e.is_empty()) else {
        return Ok(Json(
            serde_json::json!({ "hasProfile": false, "profile": null }),
        ));
    };

    let directory = app.directory.clone();
    let profile = tokio::task::spawn_blocking(move || directory.find_by_email(&email))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))?;

    Ok(Json(serde_json::json!({
        "hasProfile": profile.is_some(),
        "profile": profile,
    })))
}
