//! CLI error type.

use kronos_client::{ConfigError, ServiceError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Not signed in. Run `kronos login <email> --password <password>` first")]
    NotSignedIn,

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Operation failed: {0}")]
    Failed(&'static str),
}
