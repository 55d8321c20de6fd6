//! Handler outcomes
//!
//! Every handler resolves one raw payload into exactly one of three
//! outcomes, modeled as an explicit enum so callers must handle all three.

use relay_core::Snowflake;

/// Three-way result of handling one raw event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleOutcome {
    /// Handled to completion: either an event was dispatched or there was
    /// intentionally nothing to produce.
    Done,
    /// Deliberately discarded: a referenced entity is not cached and is not
    /// expected to arrive in-band, so retrying would only grow a backlog.
    Drop,
    /// The named guild is still synchronizing; the caller must re-present
    /// the same payload after the guild unlocks.
    Retry(Snowflake),
}

impl HandleOutcome {
    /// Whether the payload was handled to completion
    #[inline]
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Whether the payload was deliberately discarded
    #[inline]
    #[must_use]
    pub fn is_drop(&self) -> bool {
        matches!(self, Self::Drop)
    }

    /// The guild to wait on, if the payload was deferred
    #[must_use]
    pub fn retry_guild(&self) -> Option<Snowflake> {
        match self {
            Self::Retry(guild_id) => Some(*guild_id),
            _ => None,
        }
    }
}
