use thiserror::Error;

#[derive(Debug, Error)]
pub enum TeamlensError {
    #[error("team member not found: {0}")]
    MemberNotFound(String),

    #[error("profile not found for email: {0}")]
    ProfileNotFound(String),

    #[error("profile must include {0}")]
    MissingField(&'static str),

    #[error("profile generation failed: {0}")]
    Generation(String),

    #[error("LLM API key not configured: set ANTHROPIC_API_KEY")]
    ApiKeyMissing,

    #[error("profile store error: {0}")]
    Store(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TeamlensError>;
