use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use teamlens_core::error::TeamlensError;
use teamlens_llm::LlmError;

// ---------------------------------------------------------------------------
// Internal sentinels for explicit statuses
// ---------------------------------------------------------------------------

/// Private sentinel error type used to carry an explicit HTTP 400 through
/// the `anyhow::Error` chain without touching the `TeamlensError` enum.
#[derive(Debug)]
struct BadRequestError(String);

impl std::fmt::Display for BadRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BadRequestError {}

/// Private sentinel error type used to carry an explicit HTTP 404 through
/// the `anyhow::Error` chain.
#[derive(Debug)]
struct NotFoundError(String);

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for NotFoundError {}

// ---------------------------------------------------------------------------
// AppError — unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 400 Bad Request error with the given message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(BadRequestError(msg.into()).into())
    }

    /// Construct a 404 Not Found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self(NotFoundError(msg.into()).into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(b) = self.0.downcast_ref::<BadRequestError>() {
            let body = serde_json::json!({ "error": b.0.clone() });
            return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
        }
        if let Some(n) = self.0.downcast_ref::<NotFoundError>() {
            let body = serde_json::json!({ "error": n.0.clone() });
            return (StatusCode::NOT_FOUND, axum::Json(body)).into_response();
        }

        let status = if let Some(e) = self.0.downcast_ref::<TeamlensError>() {
            match e {
                TeamlensError::MemberNotFound(_) | TeamlensError::ProfileNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                TeamlensError::MissingField(_) => StatusCode::BAD_REQUEST,
                TeamlensError::ApiKeyMissing => StatusCode::SERVICE_UNAVAILABLE,
                TeamlensError::Generation(_)
                | TeamlensError::Store(_)
                | TeamlensError::Io(_)
                | TeamlensError::Yaml(_)
                | TeamlensError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        } else if let Some(e) = self.0.downcast_ref::<LlmError>() {
            match e {
                LlmError::Api { .. } | LlmError::Http(_) => StatusCode::BAD_GATEWAY,
                LlmError::EmptyResponse | LlmError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_not_found_maps_to_404() {
        let err = AppError(TeamlensError::MemberNotFound("nobody".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn profile_not_found_maps_to_404() {
        let err = AppError(TeamlensError::ProfileNotFound("x@y.z".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn missing_field_maps_to_400() {
        let err = AppError(TeamlensError::MissingField("email").into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_key_missing_maps_to_503() {
        let err = AppError(TeamlensError::ApiKeyMissing.into());
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn generation_failure_maps_to_500() {
        let err = AppError(TeamlensError::Generation("still not JSON".into()).into());
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_failure_maps_to_500() {
        let err = AppError(TeamlensError::Store("io".into()).into());
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn upstream_api_error_maps_to_502() {
        let err = AppError(
            LlmError::Api {
                status: 429,
                message: "rate limited".into(),
            }
            .into(),
        );
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn bad_request_constructor_maps_to_400() {
        let err = AppError::bad_request("Message is required");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_constructor_maps_to_404() {
        let err = AppError::not_found("Team member not found");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unknown_error_maps_to_500() {
        let err = AppError(anyhow::anyhow!("something unexpected"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn response_body_is_json_error_object() {
        let err = AppError::not_found("Team member not found");
        let response = err.into_response();
        let ct = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .expect("should have content-type");
        assert!(ct.to_str().unwrap().contains("application/json"));
    }
}
