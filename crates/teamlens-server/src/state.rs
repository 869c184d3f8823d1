use std::sync::Arc;

use teamlens_core::config::Config;
use teamlens_core::error::TeamlensError;
use teamlens_core::store::ProfileStore;
use teamlens_core::Directory;

use crate::error::AppError;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub directory: Directory,
    pub llm: Option<teamlens_llm::Client>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn ProfileStore>,
        llm: Option<teamlens_llm::Client>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            directory: Directory::new(store),
            llm,
        }
    }

    /// The generation client, or a 503-mapped error when no API key was
    /// configured at startup.
    pub fn llm(&self) -> Result<&teamlens_llm::Client, AppError> {
        self.llm
            .as_ref()
            .ok_or_else(|| AppError(TeamlensError::ApiKeyMissing.into()))
    }
}
