//! Chat-completion client for the shopping assistant.

mod types;

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::instrument;

pub use types::{ChatMessage, Choice, ChoiceMessage, CompletionRequest, CompletionResponse};

use crate::config::GroqConfig;
use crate::error::ChatError;

/// Fixed persona for the storefront assistant.
pub const SYSTEM_PROMPT: &str = "Eres un asistente para un ecommerce de tecnología llamado KronosTech. \
Ayudas a elegir productos, resolver dudas de compra/envíos/garantía, y recomiendas de forma breve y clara. \
Si falta información, haz 1-2 preguntas concretas.";

pub const TEMPERATURE: f32 = 0.4;
pub const MAX_TOKENS: u32 = 300;

/// Fallback message when the provider's error body has none.
const UPSTREAM_FAILED: &str = "Groq request failed";

/// Chat-completion API client.
#[derive(Clone)]
pub struct GroqClient {
    inner: Arc<GroqClientInner>,
}

struct GroqClientInner {
    client: reqwest::Client,
    api_url: String,
    model: String,
}

impl std::fmt::Debug for GroqClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqClient")
            .field("api_url", &self.inner.api_url)
            .field("model", &self.inner.model)
            .finish_non_exhaustive()
    }
}

impl GroqClient {
    #[must_use]
    pub fn new(config: &GroqConfig) -> Self {
        Self {
            inner: Arc::new(GroqClientInner {
                client: reqwest::Client::new(),
                api_url: config.api_url.clone(),
                model: config.model.clone(),
            }),
        }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.inner.model
    }

    /// Ask the assistant about `message` and return its trimmed reply.
    ///
    /// # Errors
    ///
    /// - `ChatError::Upstream` if the provider answers with a non-2xx status
    /// - `ChatError::EmptyReply` if the first choice carries no text
    /// - `ChatError::Unexpected` on transport or decoding failures
    #[instrument(skip(self, api_key, message), fields(model = %self.inner.model, chars = message.chars().count()))]
    pub async fn reply(&self, api_key: &SecretString, message: &str) -> Result<String, ChatError> {
        let request = CompletionRequest {
            model: self.inner.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(message)],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .inner
            .client
            .post(&self.inner.api_url)
            .bearer_auth(api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            return Err(upstream_error(status.as_u16(), &raw));
        }

        let completion: CompletionResponse = response.json().await?;
        completion.reply().ok_or(ChatError::EmptyReply)
    }
}

/// Error for a non-2xx provider answer. The body is kept as JSON when it
/// parses, otherwise as the raw text.
fn upstream_error(status: u16, raw: &str) -> ChatError {
    let details = if raw.is_empty() {
        Value::String(String::new())
    } else {
        serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
    };

    let message = details
        .pointer("/error/message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(UPSTREAM_FAILED)
        .to_owned();

    ChatError::Upstream {
        status,
        message,
        details,
    }
}
