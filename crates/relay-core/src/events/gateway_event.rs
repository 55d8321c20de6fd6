//! Resolved gateway events
//!
//! A resolved event is the typed output of the handler pipeline. It is only
//! ever constructed with a non-null channel and user, carries the dispatch
//! sequence number, and is consumed exactly once by the dispatcher.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::entities::{GuildMember, MessageChannel, User};
use crate::events::GatewayEventType;
use crate::value_objects::Snowflake;

/// A user started typing in a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingStartEvent {
    /// Monotonic dispatch sequence number, stamped by the dispatcher
    pub response_number: u64,
    pub user: Arc<User>,
    pub channel: MessageChannel,
    /// When typing started, decoded from epoch seconds at UTC
    pub timestamp: DateTime<Utc>,
    /// The guild member, when the payload carried fresh member data
    pub member: Option<GuildMember>,
}

/// A reaction was added to a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionAddEvent {
    /// Monotonic dispatch sequence number, stamped by the dispatcher
    pub response_number: u64,
    pub user: Arc<User>,
    pub channel: MessageChannel,
    pub message_id: Snowflake,
    /// The emoji's name as carried on the wire
    pub emoji: String,
    pub member: Option<GuildMember>,
}

/// Any fully-resolved event, ready for delivery to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayEvent {
    TypingStart(TypingStartEvent),
    ReactionAdd(ReactionAddEvent),
}

impl GatewayEvent {
    /// The kind of this event
    #[must_use]
    pub fn event_type(&self) -> GatewayEventType {
        match self {
            Self::TypingStart(_) => GatewayEventType::TypingStart,
            Self::ReactionAdd(_) => GatewayEventType::MessageReactionAdd,
        }
    }

    /// The dispatch sequence number
    #[must_use]
    pub fn response_number(&self) -> u64 {
        match self {
            Self::TypingStart(e) => e.response_number,
            Self::ReactionAdd(e) => e.response_number,
        }
    }

    /// Stamp the dispatch sequence number
    pub fn set_response_number(&mut self, seq: u64) {
        match self {
            Self::TypingStart(e) => e.response_number = seq,
            Self::ReactionAdd(e) => e.response_number = seq,
        }
    }

    /// The resolved user behind this event
    #[must_use]
    pub fn user(&self) -> &Arc<User> {
        match self {
            Self::TypingStart(e) => &e.user,
            Self::ReactionAdd(e) => &e.user,
        }
    }

    /// The resolved channel this event happened in
    #[must_use]
    pub fn channel(&self) -> &MessageChannel {
        match self {
            Self::TypingStart(e) => &e.channel,
            Self::ReactionAdd(e) => &e.channel,
        }
    }

    /// The owning guild, if the event is guild-scoped
    #[must_use]
    pub fn guild_id(&self) -> Option<Snowflake> {
        self.channel().guild_id()
    }

    /// The resolved member, when present
    #[must_use]
    pub fn member(&self) -> Option<&GuildMember> {
        match self {
            Self::TypingStart(e) => e.member.as_ref(),
            Self::ReactionAdd(e) => e.member.as_ref(),
        }
    }
}
