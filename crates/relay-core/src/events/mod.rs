//! Gateway events - wire type names and fully-resolved typed events

mod event_types;
mod gateway_event;

pub use event_types::GatewayEventType;
pub use gateway_event::{GatewayEvent, ReactionAddEvent, TypingStartEvent};
