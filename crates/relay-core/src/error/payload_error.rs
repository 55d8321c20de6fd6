//! Payload errors - protocol-contract violations in inbound payloads
//!
//! A missing or ill-typed required field means the remote service broke its
//! documented event shape. This is the only condition the resolution core
//! treats as a hard failure; unresolved entity references are handled by
//! dropping or deferring the event instead.

use thiserror::Error;

/// Errors raised while reading fields out of a raw gateway payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field `{field}` is not a valid {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Payload data is not an object")]
    NotAnObject,
}

impl PayloadError {
    /// Build an invalid-field error
    #[must_use]
    pub fn invalid(field: &'static str, expected: &'static str) -> Self {
        Self::InvalidField { field, expected }
    }
}
