//! Application error types
//!
//! Unified error handling across the client crates.

use relay_core::PayloadError;

use crate::config::ConfigError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Protocol-contract violations from the remote service
    #[error(transparent)]
    Payload(#[from] PayloadError),

    // Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    // Internal errors
    #[error("Internal error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    /// Whether this error indicates the remote service broke its contract
    #[must_use]
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, Self::Payload(_))
    }
}

/// Application result type alias
pub type AppResult<T> = Result<T, AppError>;
