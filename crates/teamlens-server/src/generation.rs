//! Profile-generation orchestration: call the model, parse its JSON, and on
//! malformed output retry exactly once with a corrective instruction.

use teamlens_core::error::TeamlensError;
use teamlens_llm::{ChatMessage, Client, MessagesRequest};

/// Malformed generator output is retried at most this many times. Fixed by
/// design; the domain does not call for a configurable retry policy.
pub const MAX_PARSE_RETRIES: usize = 1;

const CORRECTION_PROMPT: &str = "That response was not valid JSON. Please return ONLY a valid \
     JSON object with no markdown formatting, no code fences, and no extra text.";

/// Parse model output as a JSON object, tolerating prose or code fences
/// around the object itself.
pub fn parse_json_lenient(text: &str) -> Option<serde_json::Value> {
    if let Ok(v) = serde_json::from_str(text) {
        return Some(v);
    }
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

/// Run `prompt` and parse the reply as JSON, retrying once on malformed
/// output by extending the conversation with the raw reply and a corrective
/// instruction. A second malformed reply is a terminal generation error.
pub async fn generate_json(
    llm: &Client,
    model: &str,
    max_tokens: u32,
    prompt: &str,
) -> Result<serde_json::Value, TeamlensError> {
    let request = MessagesRequest::single(model, max_tokens, prompt);
    let raw = llm
        .complete(&request)
        .await
        .map_err(|e| TeamlensError::Generation(e.to_string()))?;

    if let Some(value) = parse_json_lenient(&raw) {
        return Ok(value);
    }

    tracing::warn!("generated output was not valid JSON, retrying once");
    for _ in 0..MAX_PARSE_RETRIES {
        let retry = MessagesRequest {
            model: model.to_string(),
            max_tokens,
            system: None,
            messages: vec![
                ChatMessage::user(prompt),
                ChatMessage::assistant(raw.clone()),
                ChatMessage::user(CORRECTION_PROMPT),
            ],
        };
        let retry_raw = llm
            .complete(&retry)
            .await
            .map_err(|e| TeamlensError::Generation(e.to_string()))?;
        if let Some(value) = parse_json_lenient(&retry_raw) {
            return Ok(value);
        }
    }

    Err(TeamlensError::Generation(
        "model returned malformed JSON after retry".to_string(),
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn text_body(text: &str) -> String {
        serde_json::json!({
            "content": [{"type": "text", "text": text}],
        })
        .to_string()
    }

    #[test]
    fn lenient_parse_accepts_plain_json() {
        let v = parse_json_lenient(r#"{"id": "ada-lovelace"}"#).unwrap();
        assert_eq!(v["id"], "ada-lovelace");
    }

    #[test]
    fn lenient_parse_strips_code_fences() {
        let v = parse_json_lenient("```json\n{\"id\": \"ada\"}\n```").unwrap();
        assert_eq!(v["id"], "ada");
    }

    #[test]
    fn lenient_parse_rejects_prose() {
        assert!(parse_json_lenient("I cannot generate a profile.").is_none());
    }

    #[tokio::test]
    async fn malformed_then_valid_succeeds_on_retry() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("POST", "/v1/messages")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "model": "claude-3-haiku-20240307",
                "max_tokens": 2048,
                "messages": [{"role": "user", "content": "generate"}],
            })))
            .with_status(200)
            .with_body(text_body("Sure! Here is the profile you asked for."))
            .create_async()
            .await;
        let second = server
            .mock("POST", "/v1/messages")
            .match_body(mockito::Matcher::Regex("not valid JSON".into()))
            .with_status(200)
            .with_body(text_body(r#"{"id":"ada-lovelace","mbti":"INTJ"}"#))
            .create_async()
            .await;

        let client = teamlens_llm::Client::new("test-key").with_base_url(server.url());
        let value = generate_json(&client, "claude-3-haiku-20240307", 2048, "generate")
            .await
            .unwrap();

        assert_eq!(value["mbti"], "INTJ");
        first.assert_async().await;
        second.assert_async().await;
    }

    #[tokio::test]
    async fn malformed_twice_is_terminal() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .with_status(200)
            .with_body(text_body("still not json"))
            .expect(2)
            .create_async()
            .await;

        let client = teamlens_llm::Client::new("test-key").with_base_url(server.url());
        let err = generate_json(&client, "claude-3-haiku-20240307", 2048, "generate")
            .await
            .unwrap_err();

        assert!(matches!(err, TeamlensError::Generation(_)));
        // Exactly one retry: two calls total, never a third.
        mock.assert_async().await;
    }
}
