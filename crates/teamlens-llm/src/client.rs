use crate::error::LlmError;
use crate::types::{MessagesRequest, MessagesResponse};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Client for the Messages endpoint. Cheap to clone; holds a pooled
/// `reqwest::Client`.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl Client {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Point the client at a different host. Used by tests against a mock
    /// server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Send a messages request and return the first text block of the reply.
    ///
    /// Generation calls are long-running (seconds); callers own any
    /// user-visible loading state. No deadline is imposed here beyond the
    /// transport's.
    pub async fn complete(&self, request: &MessagesRequest) -> Result<String, LlmError> {
        let url = format!("{}/v1/messages", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: MessagesResponse = serde_json::from_str(&response.text().await?)?;
        tracing::debug!(
            input_tokens = parsed.usage.input_tokens,
            output_tokens = parsed.usage.output_tokens,
            model = %request.model,
            "completion finished"
        );
        parsed
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyResponse)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
