pub mod error;
pub mod generation;
pub mod prompts;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use teamlens_core::config::Config;
use teamlens_core::store::{ProfileStore, RedbStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Directory
        .route("/api/team", get(routes::team::list_members))
        .route("/api/team/{id}", get(routes::team::get_member))
        .route("/api/me", get(routes::me::get_me))
        // Onboarding
        .route("/api/quiz", get(routes::quiz::get_questions))
        .route("/api/profile/generate", post(routes::profile::generate))
        .route("/api/profile", post(routes::profile::save))
        .route("/api/profile/avatar", post(routes::profile::update_avatar))
        // Assistant
        .route("/api/chat", post(routes::chat::chat))
        .route("/api/compare", post(routes::compare::compare))
        .route("/api/insights", post(routes::insights::insights))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the API server: open the profile store, wire up the LLM client if
/// an API key is present, and listen on the configured port.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let store: Arc<dyn ProfileStore> = Arc::new(RedbStore::open(&config.db_path)?);

    let llm = match Config::api_key() {
        Some(key) => Some(teamlens_llm::Client::new(key)),
        None => {
            tracing::warn!("ANTHROPIC_API_KEY not set; generation routes will return 503");
            None
        }
    };

    let port = config.port;
    let app = build_router(AppState::new(config, store, llm));

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("teamlens API listening on http://localhost:{port}");

    axum::serve(listener, app).await?;
    Ok(())
}
