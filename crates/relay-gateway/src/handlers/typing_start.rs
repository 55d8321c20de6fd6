//! Typing Start handler (`TYPING_START`)

use chrono::TimeZone;
use chrono::Utc;
use std::sync::Arc;

use relay_core::{GatewayEvent, PayloadError, RawEvent, TypingStartEvent};

use super::{resolve_channel, HandleOutcome, HandlerResult};
use crate::state::GatewayState;

/// Handles typing indicator events
pub struct TypingStartHandler;

impl TypingStartHandler {
    /// Resolve one `TYPING_START` payload
    pub fn handle(state: &GatewayState, payload: &RawEvent) -> HandlerResult<HandleOutcome> {
        // Events for a guild that is still synchronizing must not resolve
        // against half-built caches; defer them untouched.
        if let Some(guild_id) = payload.optional_snowflake("guild_id")? {
            if state.setup().is_locked(guild_id) {
                return Ok(HandleOutcome::Retry(guild_id));
            }
        }

        let channel_id = payload.snowflake("channel_id")?;
        let channel = match resolve_channel(state, channel_id) {
            Some(channel) => channel,
            None => {
                // Not retained: typing bursts in an uncached channel are
                // frequent, and if the channel never arrives the backlog
                // would grow without bound.
                tracing::trace!(
                    channel_id = %channel_id,
                    "Typing event for uncached channel dropped"
                );
                return Ok(HandleOutcome::Drop);
            }
        };

        let user_id = payload.snowflake("user_id")?;
        let mut user = match channel.recipient() {
            // A private channel has a fixed counterpart.
            Some(recipient) => Some(Arc::clone(recipient)),
            None => state.caches().users().get(user_id),
        };

        let mut member = None;
        if let Some(member_doc) = payload.optional_object("member")? {
            let guild = payload
                .optional_snowflake("guild_id")?
                .and_then(|guild_id| state.caches().guilds().get(guild_id));
            let Some(guild) = guild else {
                tracing::trace!(user_id = %user_id, "Typing event for unknown guild dropped");
                return Ok(HandleOutcome::Drop);
            };

            let builder = state.entity_builder();
            let built = builder.create_member(&guild, member_doc)?;
            builder.update_member_cache(&built);
            // Nested member data is fresher than the base cache lookup.
            user = Some(Arc::clone(&built.user));
            member = Some(built);
        }

        let Some(user) = user else {
            tracing::trace!(user_id = %user_id, "Typing event for uncached user dropped");
            return Ok(HandleOutcome::Drop);
        };

        let seconds = payload.int("timestamp")?;
        let timestamp = Utc
            .timestamp_opt(seconds, 0)
            .single()
            .ok_or(PayloadError::invalid("timestamp", "epoch seconds"))?;

        state
            .dispatcher()
            .dispatch(GatewayEvent::TypingStart(TypingStartEvent {
                response_number: 0,
                user,
                channel,
                timestamp,
                member,
            }));

        Ok(HandleOutcome::Done)
    }
}
