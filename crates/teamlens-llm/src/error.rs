use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("response contained no text content")]
    EmptyResponse,

    #[error("failed to parse API response: {0}")]
    Json(#[from] serde_json::Error),
}
