//! Aggregate of all entity cache views
//!
//! One shared instance is read by every concurrent handler invocation and
//! written by the entity builder and the state-synchronization collaborator.

use std::sync::Arc;

use relay_core::{Guild, PrivateChannel, TextChannel, User};

use super::{CacheView, MemberCache};

/// All per-entity-kind caches behind one handle
#[derive(Debug, Default)]
pub struct EntityCaches {
    text_channels: CacheView<TextChannel>,
    private_channels: CacheView<PrivateChannel>,
    users: CacheView<Arc<User>>,
    guilds: CacheView<Guild>,
    members: MemberCache,
}

impl EntityCaches {
    /// Create empty caches
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create empty caches wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Guild text channels keyed by channel ID
    pub fn text_channels(&self) -> &CacheView<TextChannel> {
        &self.text_channels
    }

    /// Private (direct-message) channels keyed by channel ID
    pub fn private_channels(&self) -> &CacheView<PrivateChannel> {
        &self.private_channels
    }

    /// Users keyed by user ID; entries are shared via Arc
    pub fn users(&self) -> &CacheView<Arc<User>> {
        &self.users
    }

    /// Guilds keyed by guild ID
    pub fn guilds(&self) -> &CacheView<Guild> {
        &self.guilds
    }

    /// Members keyed by (guild ID, user ID)
    pub fn members(&self) -> &MemberCache {
        &self.members
    }

    /// Total writes across every view
    ///
    /// Test probe for the guarantee that deferred and dropped events perform
    /// zero cache mutations.
    pub fn write_count(&self) -> u64 {
        self.text_channels.write_count()
            + self.private_channels.write_count()
            + self.users.write_count()
            + self.guilds.write_count()
            + self.members.write_count()
    }
}
