use axum::Json;
use teamlens_core::quiz;

/// GET /api/quiz — the onboarding question bank.
pub async fn get_questions() -> Json<&'static [quiz::QuizQuestion]> {
    Json(quiz::questions())
}
