//! Event pump
//!
//! Offloads handler execution from the inbound reader to a worker task per
//! guild. One task per guild keeps per-guild arrival order intact while
//! distinct guilds process concurrently; payloads without a guild (direct
//! messages) share one dedicated lane. Guild-unlock notifications travel
//! in-band on the guild's lane, so a drain is ordered against every payload
//! submitted before it.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

use relay_common::RelayConfig;
use relay_core::{RawEvent, Snowflake};

use crate::handlers::HandlerResult;
use crate::replay::EventProcessor;

const DEFAULT_LANE_BUFFER: usize = 256;

enum LaneMessage {
    Event(RawEvent),
    GuildReady(Snowflake),
}

/// Routes inbound payloads to per-guild worker tasks
pub struct EventPump {
    processor: Arc<EventProcessor>,
    lanes: DashMap<Option<Snowflake>, mpsc::Sender<LaneMessage>>,
    lane_buffer: usize,
}

impl EventPump {
    /// Create a pump over the given processor
    #[must_use]
    pub fn new(processor: Arc<EventProcessor>) -> Self {
        Self::with_lane_buffer(processor, DEFAULT_LANE_BUFFER)
    }

    /// Create a pump with a custom per-lane buffer size
    #[must_use]
    pub fn with_lane_buffer(processor: Arc<EventProcessor>, lane_buffer: usize) -> Self {
        Self {
            processor,
            lanes: DashMap::new(),
            lane_buffer,
        }
    }

    /// Create a pump sized by the loaded configuration
    #[must_use]
    pub fn from_config(processor: Arc<EventProcessor>, config: &RelayConfig) -> Self {
        Self::with_lane_buffer(processor, config.events.lane_buffer)
    }

    /// The underlying processor
    pub fn processor(&self) -> &Arc<EventProcessor> {
        &self.processor
    }

    /// Submit one inbound payload for processing
    ///
    /// # Errors
    /// Fails only when the payload's `guild_id` field is ill-typed; all
    /// later failures are reported by the worker lane.
    pub async fn submit(&self, payload: RawEvent) -> HandlerResult<()> {
        let key = payload.optional_snowflake("guild_id")?;
        let sender = self.lane_sender(key);
        if sender.send(LaneMessage::Event(payload)).await.is_err() {
            tracing::warn!(guild = ?key, "Event lane closed; payload discarded");
        }
        Ok(())
    }

    /// Signal that a guild finished setup, triggering an in-order replay
    pub async fn guild_ready(&self, guild_id: Snowflake) {
        let sender = self.lane_sender(Some(guild_id));
        if sender
            .send(LaneMessage::GuildReady(guild_id))
            .await
            .is_err()
        {
            tracing::warn!(guild_id = %guild_id, "Event lane closed; unlock signal discarded");
        }
    }

    /// Close all lanes and discard retained payloads (connection teardown)
    ///
    /// In-flight handler invocations run to completion; nothing new starts.
    pub fn shutdown(&self) {
        self.lanes.clear();
        self.processor.discard_backlog();
        tracing::debug!("Event pump shut down");
    }

    /// Number of live worker lanes
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    fn lane_sender(&self, key: Option<Snowflake>) -> mpsc::Sender<LaneMessage> {
        self.lanes
            .entry(key)
            .or_insert_with(|| {
                let (tx, rx) = mpsc::channel(self.lane_buffer);
                let processor = Arc::clone(&self.processor);
                tokio::spawn(run_lane(processor, rx, key));
                tracing::trace!(guild = ?key, "Event lane started");
                tx
            })
            .clone()
    }
}

impl std::fmt::Debug for EventPump {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventPump")
            .field("lanes", &self.lanes.len())
            .field("lane_buffer", &self.lane_buffer)
            .finish()
    }
}

async fn run_lane(
    processor: Arc<EventProcessor>,
    mut rx: mpsc::Receiver<LaneMessage>,
    key: Option<Snowflake>,
) {
    while let Some(message) = rx.recv().await {
        match message {
            LaneMessage::Event(payload) => {
                if let Err(err) = processor.process(payload) {
                    tracing::error!(
                        guild = ?key,
                        error = %err,
                        "Malformed inbound payload"
                    );
                }
            }
            LaneMessage::GuildReady(guild_id) => {
                if let Err(err) = processor.guild_ready(guild_id) {
                    tracing::error!(
                        guild_id = %guild_id,
                        error = %err,
                        "Replay aborted on malformed deferred payload"
                    );
                }
            }
        }
    }
    tracing::trace!(guild = ?key, "Event lane ended");
}
