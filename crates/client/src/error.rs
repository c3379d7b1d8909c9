//! Error types for the storefront client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by service operations.
///
/// Both variants carry a display-ready message: the backend-supplied message
/// when one was present, otherwise the per-operation default.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request failed below the application layer: connection error,
    /// non-2xx status without an envelope, or an undecodable body.
    #[error("{message}")]
    Transport {
        status: Option<StatusCode>,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The backend answered with `success: false` (or omitted `data`).
    #[error("{message}")]
    Rejected {
        status: Option<StatusCode>,
        message: String,
    },
}

impl ServiceError {
    pub(crate) fn rejected(status: StatusCode, message: Option<String>, default: &str) -> Self {
        Self::Rejected {
            status: Some(status),
            message: message_or_default(message, default),
        }
    }

    pub(crate) fn transport(
        status: Option<StatusCode>,
        message: Option<String>,
        default: &str,
        source: Option<reqwest::Error>,
    ) -> Self {
        Self::Transport {
            status,
            message: message_or_default(message, default),
            source,
        }
    }

    /// Display-ready message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Transport { message, .. } | Self::Rejected { message, .. } => message,
        }
    }

    /// HTTP status of the response, when one was received.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Transport { status, .. } | Self::Rejected { status, .. } => *status,
        }
    }

    /// Whether the backend refused the bearer credential.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

fn message_or_default(message: Option<String>, default: &str) -> String {
    message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| default.to_owned())
}

/// Errors raised by persistent client-side storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No storage capability is attached to this client context.
    #[error("persistent storage is not available")]
    Unavailable,

    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be encoded or decoded.
    #[error("storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}
