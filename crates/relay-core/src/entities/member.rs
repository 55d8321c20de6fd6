//! Member entity - represents a user's membership in a guild

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::entities::User;
use crate::value_objects::Snowflake;

/// Guild member entity (junction between User and Guild)
///
/// A member shares its user: the same `Arc<User>` may also be referenced
/// directly, e.g. by a private channel. Members are indexed flat by
/// (guild id, user id) for O(1) lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildMember {
    pub guild_id: Snowflake,
    pub user: Arc<User>,
    pub nickname: Option<String>,
    pub role_ids: Vec<Snowflake>,
    pub joined_at: DateTime<Utc>,
}

impl GuildMember {
    /// Create a new GuildMember
    pub fn new(guild_id: Snowflake, user: Arc<User>) -> Self {
        Self {
            guild_id,
            user,
            nickname: None,
            role_ids: Vec::new(),
            joined_at: Utc::now(),
        }
    }

    /// The member's user identifier
    #[inline]
    pub fn user_id(&self) -> Snowflake {
        self.user.id
    }

    /// Get display name (nickname if set, otherwise the username)
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.user.username)
    }

    /// Check if member has a specific role
    #[inline]
    pub fn has_role(&self, role_id: Snowflake) -> bool {
        self.role_ids.contains(&role_id)
    }
}
