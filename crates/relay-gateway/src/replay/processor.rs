//! Event processor
//!
//! Ties the router, the setup tracker, and the replay backlog together.
//! For any one guild, processing is serialized through the guild's lane
//! lock: deferred payloads replay in original arrival order before any
//! newly arriving payload for that guild is handled. Distinct guilds
//! process concurrently.

use relay_common::RelayConfig;
use relay_core::{RawEvent, Snowflake};

use crate::handlers::{EventRouter, HandleOutcome, HandlerResult};
use crate::replay::GuildBacklog;
use crate::state::GatewayState;

const DEFAULT_BACKLOG_WARN_THRESHOLD: usize = 512;

/// Applies the resolution pipeline to raw events with per-guild ordering
#[derive(Debug)]
pub struct EventProcessor {
    state: GatewayState,
    backlog: GuildBacklog,
    backlog_warn_threshold: usize,
}

impl EventProcessor {
    /// Create a processor over the given state
    #[must_use]
    pub fn new(state: GatewayState) -> Self {
        Self::with_warn_threshold(state, DEFAULT_BACKLOG_WARN_THRESHOLD)
    }

    /// Create a processor with a custom backlog warning watermark
    #[must_use]
    pub fn with_warn_threshold(state: GatewayState, backlog_warn_threshold: usize) -> Self {
        Self {
            state,
            backlog: GuildBacklog::new(),
            backlog_warn_threshold,
        }
    }

    /// Create a processor with the watermark from the loaded configuration
    #[must_use]
    pub fn from_config(state: GatewayState, config: &RelayConfig) -> Self {
        Self::with_warn_threshold(state, config.replay.backlog_warn_threshold)
    }

    /// The shared handler state
    pub fn state(&self) -> &GatewayState {
        &self.state
    }

    /// The replay backlog
    pub fn backlog(&self) -> &GuildBacklog {
        &self.backlog
    }

    /// Process one raw event
    ///
    /// Returns the handler's outcome; `Retry` means the payload is now
    /// retained in the guild's backlog and will be replayed by
    /// [`Self::guild_ready`].
    pub fn process(&self, payload: RawEvent) -> HandlerResult<HandleOutcome> {
        let Some(guild_id) = payload.optional_snowflake("guild_id")? else {
            // Direct-message context: no guild, no ordering lane.
            return EventRouter::route(&self.state, &payload);
        };

        let lane = self.backlog.lane(guild_id);
        let mut queue = lane.lock();

        if !queue.is_empty() {
            // Earlier deferred payloads must replay first; queue behind
            // them even if the guild has unlocked meanwhile.
            queue.push_back(payload);
            self.warn_if_deep(guild_id, queue.len());
            return Ok(HandleOutcome::Retry(guild_id));
        }

        let outcome = EventRouter::route(&self.state, &payload)?;
        if let Some(retry_guild) = outcome.retry_guild() {
            debug_assert_eq!(retry_guild, guild_id);
            queue.push_back(payload);
            self.warn_if_deep(guild_id, queue.len());
            tracing::debug!(
                guild_id = %guild_id,
                pending = queue.len(),
                "Event deferred until guild setup completes"
            );
        }
        Ok(outcome)
    }

    /// Unlock a guild and replay its retained payloads in arrival order
    ///
    /// Newly arriving payloads for the guild wait behind the drain, so the
    /// per-guild ordering guarantee holds across the unlock window. Returns
    /// the number of payloads replayed.
    ///
    /// # Errors
    /// A malformed deferred payload aborts the drain; the remaining
    /// payloads stay queued and a later call resumes from them.
    pub fn guild_ready(&self, guild_id: Snowflake) -> HandlerResult<usize> {
        self.state.setup().mark_ready(guild_id);

        let lane = self.backlog.lane(guild_id);
        let mut queue = lane.lock();
        let mut replayed = 0;

        while let Some(payload) = queue.pop_front() {
            match EventRouter::route(&self.state, &payload) {
                Ok(outcome) => {
                    if outcome.retry_guild().is_some() {
                        // Unreachable after unlock, but a deferral is never
                        // allowed to get lost.
                        queue.push_front(payload);
                        break;
                    }
                    replayed += 1;
                }
                Err(err) => {
                    queue.push_front(payload);
                    return Err(err);
                }
            }
        }

        if replayed > 0 {
            tracing::debug!(
                guild_id = %guild_id,
                replayed = replayed,
                "Replayed deferred events after guild setup"
            );
        }
        Ok(replayed)
    }

    /// Discard all retained payloads (connection teardown)
    pub fn discard_backlog(&self) {
        let discarded = self.backlog.total_pending();
        self.backlog.clear();
        if discarded > 0 {
            tracing::debug!(discarded = discarded, "Replay backlog discarded");
        }
    }

    fn warn_if_deep(&self, guild_id: Snowflake, pending: usize) {
        if pending == self.backlog_warn_threshold {
            tracing::warn!(
                guild_id = %guild_id,
                pending = pending,
                "Replay backlog is unusually deep; guild setup may be stalled"
            );
        }
    }
}
