//! Gate construction errors.

use std::path::PathBuf;
use thiserror::Error;

/// Why a config document was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("{0}")]
    Malformed(String),

    #[error("expected a JSON object")]
    NotAnObject,

    #[error("missing field `authorized_number`")]
    MissingField,

    #[error("`authorized_number` must be a non-empty string")]
    InvalidValue,
}

/// Errors raised while constructing an [`AuthorizationGate`](crate::AuthorizationGate).
#[derive(Error, Debug)]
pub enum GateError {
    #[error("Config file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Invalid config {}: {issue}", .path.display())]
    InvalidConfig {
        path: PathBuf,
        #[source]
        issue: ConfigIssue,
    },

    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for gate construction.
pub type GateResult<T> = Result<T, GateError>;
