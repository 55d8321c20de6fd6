//! Event handlers
//!
//! One handler per resolvable event kind, all sharing the same decision
//! procedure: guild-lock guard, entity resolution, optional member
//! materialization, then dispatch-or-drop.

mod error;
mod outcome;
mod reaction_add;
mod typing_start;

pub use error::{HandlerError, HandlerResult};
pub use outcome::HandleOutcome;
pub use reaction_add::ReactionAddHandler;
pub use typing_start::TypingStartHandler;

use relay_core::{GatewayEventType, MessageChannel, RawEvent, Snowflake};

use crate::state::GatewayState;

/// Routes raw events to the handler for their kind
pub struct EventRouter;

impl EventRouter {
    /// Handle one raw event
    ///
    /// Unknown event type names are not protocol violations - the remote
    /// service adds kinds over time - so they resolve to `Done` untouched.
    pub fn route(state: &GatewayState, payload: &RawEvent) -> HandlerResult<HandleOutcome> {
        match GatewayEventType::from_wire(payload.event_type()) {
            Some(GatewayEventType::TypingStart) => TypingStartHandler::handle(state, payload),
            Some(GatewayEventType::MessageReactionAdd) => {
                ReactionAddHandler::handle(state, payload)
            }
            None => {
                tracing::trace!(
                    event_type = %payload.event_type(),
                    "Unhandled gateway event type"
                );
                Ok(HandleOutcome::Done)
            }
        }
    }
}

/// Look up a channel ID in the guild-text cache first, then the private cache
pub(crate) fn resolve_channel(
    state: &GatewayState,
    channel_id: Snowflake,
) -> Option<MessageChannel> {
    if let Some(channel) = state.caches().text_channels().get(channel_id) {
        return Some(MessageChannel::Text(channel));
    }
    state
        .caches()
        .private_channels()
        .get(channel_id)
        .map(MessageChannel::Private)
}
