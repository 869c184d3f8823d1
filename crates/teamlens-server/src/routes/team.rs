use axum::extract::{Path, State};
use axum::Json;
use teamlens_core::TeamMember;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/team — the merged directory: built-ins without a persisted
/// override, then persisted profiles.
pub async fn list_members(State(app): State<AppState>) -> Result<Json<Vec<TeamMember>>, AppError> {
    let directory = app.directory.clone();
    let members = tokio::task::spawn_blocking(move || directory.list_all())
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))?;
    Ok(Json(members))
}

/// GET /api/team/:id — lookup by slug.
pub async fn get_member(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TeamMember>, AppError> {
    let directory = app.directory.clone();
    let member = tokio::task::spawn_blocking(move || directory.find_by_id(&id))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))?;
    member
        .map(Json)
        .ok_or_else(|| AppError::not_found("Team member not found"))
}
