//! # relay-core
//!
//! Domain layer for the gateway event resolution core: entity identifiers,
//! cached entities, raw payload access, and fully-resolved typed events.
//! This crate has zero dependencies on infrastructure (runtime, caches, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod payload;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Guild, GuildMember, MessageChannel, PrivateChannel, TextChannel, User};
pub use error::PayloadError;
pub use events::{GatewayEvent, GatewayEventType, ReactionAddEvent, TypingStartEvent};
pub use payload::{RawEvent, RawObject};
pub use value_objects::{Snowflake, SnowflakeParseError};
