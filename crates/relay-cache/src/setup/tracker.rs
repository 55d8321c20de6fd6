//! Guild setup tracker
//!
//! Records which guilds are still running their initial state
//! synchronization. While a guild is locked, events for it must be deferred
//! and replayed after unlock; a guild unlocks exactly once and never
//! transitions back. `is_locked` is side-effect free and safe to call
//! concurrently with the unlock transition: each guild is one atomic flag,
//! no lock is taken per check.

use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use relay_core::Snowflake;

/// Tracks per-guild setup state
#[derive(Debug, Default)]
pub struct GuildSetupTracker {
    locks: DashMap<Snowflake, Arc<AtomicBool>>,
}

impl GuildSetupTracker {
    /// Create a tracker with no guilds under setup
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Check whether a guild's setup is still in progress
    ///
    /// Unknown guilds read as unlocked.
    pub fn is_locked(&self, guild_id: Snowflake) -> bool {
        self.locks
            .get(&guild_id)
            .is_some_and(|flag| flag.load(Ordering::Acquire))
    }

    /// Mark a guild as entering setup
    ///
    /// Returns `true` if the guild became locked, `false` if it was already
    /// locked or has already completed setup (a guild never re-locks).
    pub fn begin_setup(&self, guild_id: Snowflake) -> bool {
        let mut newly_locked = false;
        self.locks.entry(guild_id).or_insert_with(|| {
            newly_locked = true;
            Arc::new(AtomicBool::new(true))
        });

        if newly_locked {
            tracing::debug!(guild_id = %guild_id, "Guild setup started");
        }
        newly_locked
    }

    /// Mark a guild's setup as complete, unlocking it
    ///
    /// Returns `true` if the guild was locked until now. The transition is
    /// one-shot: subsequent calls return `false`.
    pub fn mark_ready(&self, guild_id: Snowflake) -> bool {
        let was_locked = self
            .locks
            .get(&guild_id)
            .is_some_and(|flag| flag.swap(false, Ordering::AcqRel));

        if was_locked {
            tracing::debug!(guild_id = %guild_id, "Guild setup complete");
        }
        was_locked
    }

    /// Number of guilds currently locked
    pub fn locked_count(&self) -> usize {
        self.locks
            .iter()
            .filter(|entry| entry.value().load(Ordering::Acquire))
            .count()
    }

    /// Forget all tracked guilds (connection teardown)
    pub fn clear(&self) {
        self.locks.clear();
    }
}
