//! HTTP routes: the chat endpoint and a liveness probe.

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::error::ChatError;
use crate::state::AppState;

/// Longest message forwarded to the provider, in characters.
pub const MAX_MESSAGE_CHARS: usize = 2000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: String,
}

/// Build all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/chat", post(chat))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Answer one shopper message.
///
/// The body is parsed by hand so that malformed JSON gets the same error
/// shape as every other failure.
#[instrument(skip_all)]
async fn chat(State(state): State<AppState>, body: Bytes) -> Result<Json<ChatReply>, ChatError> {
    let api_key = state
        .config()
        .groq
        .api_key
        .as_ref()
        .ok_or(ChatError::MissingApiKey)?;

    let payload: Value = serde_json::from_slice(&body).map_err(|_| ChatError::InvalidBody)?;
    let message = payload
        .get("message")
        .and_then(Value::as_str)
        .and_then(prepare_message)
        .ok_or(ChatError::MissingMessage)?;

    let reply = state.groq().reply(api_key, &message).await?;
    Ok(Json(ChatReply { reply }))
}

/// Trimmed message cut to [`MAX_MESSAGE_CHARS`]; `None` when blank.
fn prepare_message(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_MESSAGE_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_message_trims() {
        assert_eq!(prepare_message("  ¿tienen RTX 4060?  ").as_deref(), Some("¿tienen RTX 4060?"));
    }

    #[test]
    fn test_prepare_message_rejects_blank() {
        assert_eq!(prepare_message(""), None);
        assert_eq!(prepare_message(" \n\t "), None);
    }

    #[test]
    fn test_prepare_message_caps_length_by_chars() {
        let long = "ñ".repeat(MAX_MESSAGE_CHARS + 50);
        let prepared = prepare_message(&long).unwrap_or_default();
        assert_eq!(prepared.chars().count(), MAX_MESSAGE_CHARS);
    }
}
