//! Client configuration structs
//!
//! Loads configuration from environment variables (with `.env` support).

use serde::Deserialize;
use std::env;

use super::ConfigError;

/// Main configuration for the gateway client
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    pub app: AppSettings,
    pub events: EventsConfig,
    pub replay: ReplayConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Event processing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EventsConfig {
    /// Buffer size of each per-guild worker lane
    #[serde(default = "default_lane_buffer")]
    pub lane_buffer: usize,
    /// Buffer size of the dispatch broadcast channel
    #[serde(default = "default_dispatch_buffer")]
    pub dispatch_buffer: usize,
}

/// Replay backlog configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayConfig {
    /// Backlog size at which a per-guild backlog logs a warning
    #[serde(default = "default_backlog_warn_threshold")]
    pub backlog_warn_threshold: usize,
}

// Default value functions
fn default_app_name() -> String {
    "relay".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_lane_buffer() -> usize {
    256
}

fn default_dispatch_buffer() -> usize {
    1024
}

fn default_backlog_warn_threshold() -> usize {
    512
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: default_env(),
            },
            events: EventsConfig {
                lane_buffer: default_lane_buffer(),
                dispatch_buffer: default_dispatch_buffer(),
            },
            replay: ReplayConfig {
                backlog_warn_threshold: default_backlog_warn_threshold(),
            },
        }
    }
}

impl RelayConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("RELAY_APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("RELAY_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            events: EventsConfig {
                lane_buffer: parse_var("RELAY_LANE_BUFFER")?.unwrap_or_else(default_lane_buffer),
                dispatch_buffer: parse_var("RELAY_DISPATCH_BUFFER")?
                    .unwrap_or_else(default_dispatch_buffer),
            },
            replay: ReplayConfig {
                backlog_warn_threshold: parse_var("RELAY_BACKLOG_WARN_THRESHOLD")?
                    .unwrap_or_else(default_backlog_warn_threshold),
            },
        })
    }
}

/// Parse an optional environment variable, erroring on unparseable values
fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Err(_) => Ok(None),
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidVar(name)),
    }
}
