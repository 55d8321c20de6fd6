//! Configuration loading

mod relay_config;

pub use relay_config::{AppSettings, Environment, EventsConfig, RelayConfig, ReplayConfig};

use thiserror::Error;

/// Configuration errors
///
/// Every variable has a default, so absence is never an error; only a
/// present-but-unparseable value is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Environment variable {0} has an invalid value")]
    InvalidVar(&'static str),
}
