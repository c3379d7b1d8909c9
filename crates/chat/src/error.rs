//! Chat route errors and their JSON responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

/// Everything that can go wrong while answering a chat message.
#[derive(Debug, Error)]
pub enum ChatError {
    /// No provider API key is configured.
    #[error("Missing GROQ_API_KEY")]
    MissingApiKey,

    /// Request body is not JSON.
    #[error("Invalid JSON body")]
    InvalidBody,

    /// Request has no usable `message`.
    #[error("Missing message")]
    MissingMessage,

    /// Provider answered with a non-2xx status.
    #[error("{message}")]
    Upstream {
        status: u16,
        message: String,
        details: Value,
    },

    /// Provider answered 2xx but without any text.
    #[error("Empty response from Groq")]
    EmptyReply,

    /// Transport or decoding failure talking to the provider.
    #[error("Unexpected error")]
    Unexpected(String),
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unexpected(err.to_string())
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::MissingApiKey => {
                tracing::error!("Chat request rejected: no provider API key configured");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": self.to_string() }))
            }
            Self::InvalidBody | Self::MissingMessage => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            Self::Upstream {
                status,
                message,
                details,
            } => {
                tracing::warn!(upstream_status = status, error = %message, "Chat provider request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": message, "status": status, "details": details }),
                )
            }
            Self::EmptyReply => {
                tracing::warn!("Chat provider returned no content");
                (StatusCode::BAD_GATEWAY, json!({ "error": self.to_string() }))
            }
            Self::Unexpected(details) => {
                tracing::error!(error = %details, "Chat request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": self.to_string(), "details": details }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
