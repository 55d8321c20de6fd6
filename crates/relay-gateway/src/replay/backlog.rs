//! Per-guild replay backlog
//!
//! Deferred payloads are retained here in arrival order until their guild
//! finishes setup. Each guild has one lane; the lane's mutex doubles as the
//! single-writer guarantee for that guild's event processing.

use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

use relay_core::{RawEvent, Snowflake};

/// Ordered per-guild payload backlog
#[derive(Debug, Default)]
pub struct GuildBacklog {
    lanes: DashMap<Snowflake, Arc<Mutex<VecDeque<RawEvent>>>>,
}

impl GuildBacklog {
    /// Create an empty backlog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the lane for a guild
    pub(crate) fn lane(&self, guild_id: Snowflake) -> Arc<Mutex<VecDeque<RawEvent>>> {
        self.lanes.entry(guild_id).or_default().clone()
    }

    /// Number of payloads retained for one guild
    pub fn pending(&self, guild_id: Snowflake) -> usize {
        self.lanes
            .get(&guild_id)
            .map_or(0, |lane| lane.lock().len())
    }

    /// Number of payloads retained across all guilds
    pub fn total_pending(&self) -> usize {
        self.lanes.iter().map(|entry| entry.value().lock().len()).sum()
    }

    /// Discard every retained payload (connection teardown)
    pub fn clear(&self) {
        for entry in self.lanes.iter() {
            entry.value().lock().clear();
        }
        self.lanes.clear();
    }
}
