//! Domain errors - error types for the domain layer

mod payload_error;

pub use payload_error::PayloadError;
