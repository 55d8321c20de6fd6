//! # relay-gateway
//!
//! The gateway event resolution core: turns raw inbound payloads into
//! fully-resolved typed events, deferring events for guilds that are still
//! synchronizing and deliberately dropping events whose referenced
//! entities are not cached.

pub mod builder;
pub mod dispatch;
pub mod handlers;
pub mod pump;
pub mod replay;
pub mod state;

// Re-export commonly used types at crate root
pub use builder::EntityBuilder;
pub use dispatch::{BroadcastSink, CollectingSink, DispatchSink, EventDispatcher};
pub use handlers::{
    EventRouter, HandleOutcome, HandlerError, HandlerResult, ReactionAddHandler,
    TypingStartHandler,
};
pub use pump::EventPump;
pub use replay::{EventProcessor, GuildBacklog};
pub use state::GatewayState;
