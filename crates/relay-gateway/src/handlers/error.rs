//! Handler error types

use relay_core::PayloadError;
use thiserror::Error;

/// Handler error type
///
/// The only hard failure in the resolution core is a malformed payload: a
/// protocol-contract violation by the remote service. Unresolved entity
/// references are not errors; they surface as `Drop` or `Retry` outcomes.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Invalid or incomplete payload
    #[error("Invalid payload: {0}")]
    Payload(#[from] PayloadError),
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
