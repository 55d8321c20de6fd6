//! Reaction Add handler (`MESSAGE_REACTION_ADD`)
//!
//! Same guard / resolve / build-or-drop shape as the typing handler, for
//! the reaction event kind.

use std::sync::Arc;

use relay_core::{GatewayEvent, RawEvent, ReactionAddEvent};

use super::{resolve_channel, HandleOutcome, HandlerResult};
use crate::state::GatewayState;

/// Handles reaction-added events
pub struct ReactionAddHandler;

impl ReactionAddHandler {
    /// Resolve one `MESSAGE_REACTION_ADD` payload
    pub fn handle(state: &GatewayState, payload: &RawEvent) -> HandlerResult<HandleOutcome> {
        if let Some(guild_id) = payload.optional_snowflake("guild_id")? {
            if state.setup().is_locked(guild_id) {
                return Ok(HandleOutcome::Retry(guild_id));
            }
        }

        let channel_id = payload.snowflake("channel_id")?;
        let channel = match resolve_channel(state, channel_id) {
            Some(channel) => channel,
            None => {
                tracing::trace!(
                    channel_id = %channel_id,
                    "Reaction event for uncached channel dropped"
                );
                return Ok(HandleOutcome::Drop);
            }
        };

        let user_id = payload.snowflake("user_id")?;
        let mut user = match channel.recipient() {
            Some(recipient) => Some(Arc::clone(recipient)),
            None => state.caches().users().get(user_id),
        };

        let mut member = None;
        if let Some(member_doc) = payload.optional_object("member")? {
            let guild = payload
                .optional_snowflake("guild_id")?
                .and_then(|guild_id| state.caches().guilds().get(guild_id));
            let Some(guild) = guild else {
                tracing::trace!(user_id = %user_id, "Reaction event for unknown guild dropped");
                return Ok(HandleOutcome::Drop);
            };

            let builder = state.entity_builder();
            let built = builder.create_member(&guild, member_doc)?;
            builder.update_member_cache(&built);
            user = Some(Arc::clone(&built.user));
            member = Some(built);
        }

        let Some(user) = user else {
            tracing::trace!(user_id = %user_id, "Reaction event for uncached user dropped");
            return Ok(HandleOutcome::Drop);
        };

        let message_id = payload.snowflake("message_id")?;
        let emoji = payload.object("emoji")?.string("name")?.to_string();

        state
            .dispatcher()
            .dispatch(GatewayEvent::ReactionAdd(ReactionAddEvent {
                response_number: 0,
                user,
                channel,
                message_id,
                emoji,
                member,
            }));

        Ok(HandleOutcome::Done)
    }
}
