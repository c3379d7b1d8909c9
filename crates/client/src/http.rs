//! HTTP client wrapper for the REST backend.
//!
//! Every request is built against the configured base URL and carries
//! `Authorization: Bearer <token>` when the token store holds a credential.
//! The token is read at request time, never cached on the client. There is
//! no retry, refresh, or queueing.

use std::sync::Arc;

use kronos_core::{ApiResponse, Page};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ServiceError;
use crate::token::TokenStore;

// =============================================================================
// ApiClient
// =============================================================================

/// Shared, cheaply clonable handle to the backend.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    tokens: TokenStore,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for the backend named in `config`.
    #[must_use]
    pub fn new(config: &ClientConfig, tokens: TokenStore) -> Self {
        Self::with_http_client(reqwest::Client::new(), config, tokens)
    }

    /// Create a client reusing an existing connection pool.
    #[must_use]
    pub fn with_http_client(client: reqwest::Client, config: &ClientConfig, tokens: TokenStore) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url().to_owned(),
                tokens,
            }),
        }
    }

    /// Token store consulted on every request.
    #[must_use]
    pub fn tokens(&self) -> &TokenStore {
        &self.inner.tokens
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn get(&self, path: &str) -> ApiRequest {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> ApiRequest {
        self.request(Method::POST, path)
    }

    pub fn put(&self, path: &str) -> ApiRequest {
        self.request(Method::PUT, path)
    }

    pub fn patch(&self, path: &str) -> ApiRequest {
        self.request(Method::PATCH, path)
    }

    pub fn delete(&self, path: &str) -> ApiRequest {
        self.request(Method::DELETE, path)
    }

    /// Start a request to `path` (relative to the base URL, leading `/`).
    pub fn request(&self, method: Method, path: &str) -> ApiRequest {
        let url = format!("{}{path}", self.inner.base_url);
        let mut builder = self.inner.client.request(method, url);

        if let Some(token) = self.inner.tokens.get() {
            builder = builder.bearer_auth(token.expose_secret());
        }

        ApiRequest { builder }
    }
}

// =============================================================================
// ApiRequest
// =============================================================================

/// A request in flight to the backend.
///
/// Terminal methods take the operation's default error message, used when
/// the backend does not supply one.
#[must_use = "requests do nothing until a terminal method is awaited"]
pub struct ApiRequest {
    builder: RequestBuilder,
}

/// Body shape of an error response.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiRequest {
    /// Append query parameters. `None` fields are omitted.
    pub fn query<Q: Serialize + ?Sized>(self, query: &Q) -> Self {
        Self {
            builder: self.builder.query(query),
        }
    }

    /// Send `body` as JSON.
    pub fn json<B: Serialize + ?Sized>(self, body: &B) -> Self {
        Self {
            builder: self.builder.json(body),
        }
    }

    /// Expect `{success, data, message}` and return `data`.
    ///
    /// # Errors
    ///
    /// `Rejected` unless `success` is set and `data` is present; `Transport`
    /// on connection failures, non-2xx statuses, or undecodable bodies.
    pub async fn envelope<T: DeserializeOwned>(self, default_message: &str) -> Result<T, ServiceError> {
        let response = self.send(default_message).await?;
        let status = response.status();
        let envelope: ApiResponse<T> = decode(response, default_message).await?;

        match envelope {
            ApiResponse {
                success: true,
                data: Some(data),
                ..
            } => Ok(data),
            ApiResponse { message, .. } => Err(ServiceError::rejected(status, message, default_message)),
        }
    }

    /// Expect `{success, message}` and only check the flag.
    ///
    /// # Errors
    ///
    /// Same as [`ApiRequest::envelope`], without requiring `data`.
    pub async fn acknowledge(self, default_message: &str) -> Result<(), ServiceError> {
        let response = self.send(default_message).await?;
        let status = response.status();
        let envelope: ApiResponse<IgnoredAny> = decode(response, default_message).await?;

        if envelope.success {
            Ok(())
        } else {
            Err(ServiceError::rejected(status, envelope.message, default_message))
        }
    }

    /// Expect a paginated `{success, data, pagination}` body.
    ///
    /// # Errors
    ///
    /// `Rejected` if `success` is false; otherwise as
    /// [`ApiRequest::envelope`].
    pub async fn paginated<T: DeserializeOwned>(self, default_message: &str) -> Result<Page<T>, ServiceError> {
        let response = self.send(default_message).await?;
        let status = response.status();
        let page: Page<T> = decode(response, default_message).await?;

        if page.success {
            Ok(page)
        } else {
            Err(ServiceError::rejected(status, page.message, default_message))
        }
    }

    /// Decode a bare (non-enveloped) JSON body.
    ///
    /// # Errors
    ///
    /// `Transport` on connection failures, non-2xx statuses, or undecodable
    /// bodies; `Rejected` if an error status carries `success: false`.
    pub async fn raw<T: DeserializeOwned>(self, default_message: &str) -> Result<T, ServiceError> {
        let response = self.send(default_message).await?;
        decode(response, default_message).await
    }

    /// Require a 2xx status and ignore the body.
    ///
    /// # Errors
    ///
    /// As [`ApiRequest::raw`].
    pub async fn execute(self, default_message: &str) -> Result<(), ServiceError> {
        self.send(default_message).await.map(drop)
    }

    async fn send(self, default_message: &str) -> Result<Response, ServiceError> {
        let response = self
            .builder
            .send()
            .await
            .map_err(|e| ServiceError::transport(e.status(), None, default_message, Some(e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(
            status = %status,
            body = %body.chars().take(200).collect::<String>(),
            "Backend returned non-success status"
        );

        Err(error_from_body(status, &body, default_message))
    }
}

async fn decode<T: DeserializeOwned>(response: Response, default_message: &str) -> Result<T, ServiceError> {
    let status = response.status();
    response
        .json::<T>()
        .await
        .map_err(|e| ServiceError::transport(Some(status), None, default_message, Some(e)))
}

fn error_from_body(status: StatusCode, body: &str, default_message: &str) -> ServiceError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

    if parsed.success == Some(false) {
        ServiceError::rejected(status, parsed.message, default_message)
    } else {
        ServiceError::transport(Some(status), parsed.message, default_message, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ClientStorage;

    #[test]
    fn test_error_body_with_success_false_is_rejected() {
        let err = error_from_body(
            StatusCode::BAD_REQUEST,
            r#"{"success":false,"message":"Stock insuficiente"}"#,
            "Error al agregar producto al carrito",
        );
        assert!(matches!(err, ServiceError::Rejected { .. }));
        assert_eq!(err.message(), "Stock insuficiente");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_error_body_without_envelope_is_transport() {
        let err = error_from_body(
            StatusCode::BAD_GATEWAY,
            "<html>bad gateway</html>",
            "Error al obtener el carrito",
        );
        assert!(matches!(err, ServiceError::Transport { .. }));
        assert_eq!(err.message(), "Error al obtener el carrito");
    }

    #[test]
    fn test_message_only_error_body() {
        let err = error_from_body(
            StatusCode::UNAUTHORIZED,
            r#"{"message":"Token inválido"}"#,
            "Error al obtener usuario",
        );
        assert!(err.is_unauthorized());
        assert_eq!(err.message(), "Token inválido");
    }

    #[test]
    fn test_request_url_and_bearer_header() {
        let storage = ClientStorage::memory();
        let tokens = TokenStore::new(storage);
        let config = ClientConfig::with_api_url("http://localhost:3000/api/").unwrap_or_default();
        let api = ApiClient::new(&config, tokens.clone());

        let unauthenticated = api.get("/carrito").builder.build().ok();
        let request = unauthenticated.as_ref();
        assert_eq!(
            request.map(|r| r.url().as_str()),
            Some("http://localhost:3000/api/carrito")
        );
        assert!(request.and_then(|r| r.headers().get("authorization")).is_none());

        tokens.set("abc");
        let authenticated = api.get("/carrito").builder.build().ok();
        assert_eq!(
            authenticated
                .as_ref()
                .and_then(|r| r.headers().get("authorization"))
                .and_then(|v| v.to_str().ok()),
            Some("Bearer abc")
        );
    }
}
