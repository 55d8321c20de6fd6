//! Channel entities - guild text channels and private (direct-message) channels
//!
//! The two kinds live in separate caches because they carry different data:
//! a private channel has no guild and exactly one fixed counterpart user.

use std::sync::Arc;

use crate::entities::User;
use crate::value_objects::Snowflake;

/// Text channel inside a guild
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChannel {
    pub id: Snowflake,
    pub guild_id: Snowflake,
    pub name: String,
    pub position: i32,
}

impl TextChannel {
    /// Create a new guild text channel
    #[must_use]
    pub fn new(id: Snowflake, guild_id: Snowflake, name: String) -> Self {
        Self {
            id,
            guild_id,
            name,
            position: 0,
        }
    }
}

/// Private channel scoped to exactly one counterpart user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateChannel {
    pub id: Snowflake,
    pub recipient: Arc<User>,
}

impl PrivateChannel {
    /// Create a new private channel with its fixed counterpart
    #[must_use]
    pub fn new(id: Snowflake, recipient: Arc<User>) -> Self {
        Self { id, recipient }
    }
}

/// A resolved message channel of either kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageChannel {
    Text(TextChannel),
    Private(PrivateChannel),
}

impl MessageChannel {
    /// The channel's identifier
    #[inline]
    pub fn id(&self) -> Snowflake {
        match self {
            Self::Text(c) => c.id,
            Self::Private(c) => c.id,
        }
    }

    /// The owning guild, if this is a guild channel
    #[inline]
    pub fn guild_id(&self) -> Option<Snowflake> {
        match self {
            Self::Text(c) => Some(c.guild_id),
            Self::Private(_) => None,
        }
    }

    /// Check if this is a private channel
    #[inline]
    pub fn is_private(&self) -> bool {
        matches!(self, Self::Private(_))
    }

    /// The fixed counterpart user of a private channel
    pub fn recipient(&self) -> Option<&Arc<User>> {
        match self {
            Self::Text(_) => None,
            Self::Private(c) => Some(&c.recipient),
        }
    }

    /// Get display name (channel name or fallback for DMs)
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Text(c) => &c.name,
            Self::Private(_) => "Direct Message",
        }
    }
}
