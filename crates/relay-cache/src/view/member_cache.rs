//! Member cache - flat (guild, user)-keyed member view
//!
//! Members conceptually belong to their guild but are indexed flat for
//! O(1) lookup. Inserts are idempotent and last-write-wins, so replaying
//! the same member document leaves a single entry with identical state.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use relay_core::{GuildMember, Snowflake};

/// Concurrent (guild id, user id)-keyed member view
#[derive(Debug, Default)]
pub struct MemberCache {
    inner: DashMap<(Snowflake, Snowflake), GuildMember>,
    writes: AtomicU64,
}

impl MemberCache {
    /// Create an empty member cache
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: DashMap::new(),
            writes: AtomicU64::new(0),
        }
    }

    /// Look up a member, cloning it out of the cache
    pub fn get(&self, guild_id: Snowflake, user_id: Snowflake) -> Option<GuildMember> {
        self.inner
            .get(&(guild_id, user_id))
            .map(|entry| entry.clone())
    }

    /// Insert or replace a member entry (keyed by its own guild and user IDs)
    pub fn insert(&self, member: GuildMember) -> Option<GuildMember> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.inner
            .insert((member.guild_id, member.user_id()), member)
    }

    /// Check whether a member is cached
    pub fn contains(&self, guild_id: Snowflake, user_id: Snowflake) -> bool {
        self.inner.contains_key(&(guild_id, user_id))
    }

    /// Remove every member of a guild (e.g. after leaving it)
    pub fn remove_guild(&self, guild_id: Snowflake) -> usize {
        let before = self.inner.len();
        self.inner.retain(|(gid, _), _| *gid != guild_id);
        before - self.inner.len()
    }

    /// Number of cached members across all guilds
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Total number of inserts performed on this cache
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }
}
