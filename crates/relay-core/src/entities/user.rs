//! User entity - a remote account referenced by events and members

use crate::value_objects::Snowflake;

/// User entity as known to the local cache
///
/// Users are shared: a `GuildMember` and a `PrivateChannel` may both hold
/// a reference to the same user, so caches store them behind `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub discriminator: String,
    pub avatar: Option<String>,
    pub bot: bool,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, username: String, discriminator: String) -> Self {
        Self {
            id,
            username,
            discriminator,
            avatar: None,
            bot: false,
        }
    }

    /// Get the full tag: username#discriminator
    pub fn tag(&self) -> String {
        format!("{}#{}", self.username, self.discriminator)
    }

    /// Check if this is a bot account
    #[inline]
    pub fn is_bot(&self) -> bool {
        self.bot
    }
}
