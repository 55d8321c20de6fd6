//! Dispatch sinks
//!
//! A sink receives fully-resolved events. Delivery is fire-and-forget from
//! the resolution core's perspective: no return value is consumed.

use parking_lot::Mutex;
use relay_common::RelayConfig;
use tokio::sync::broadcast;

use relay_core::GatewayEvent;

/// Destination for fully-resolved events
pub trait DispatchSink: Send + Sync {
    /// Deliver one resolved event
    fn dispatch(&self, event: GatewayEvent);
}

/// Sink that fans events out to broadcast-channel subscribers
#[derive(Debug)]
pub struct BroadcastSink {
    sender: broadcast::Sender<GatewayEvent>,
}

impl BroadcastSink {
    /// Create a sink with the given subscriber buffer size
    #[must_use]
    pub fn new(buffer: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer);
        Self { sender }
    }

    /// Create a sink sized by the loaded configuration
    #[must_use]
    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(config.events.dispatch_buffer)
    }

    /// Subscribe to resolved events
    pub fn subscribe(&self) -> broadcast::Receiver<GatewayEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl DispatchSink for BroadcastSink {
    fn dispatch(&self, event: GatewayEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!("Resolved event had no subscribers");
        }
    }
}

/// Sink that retains every event in order; used by tests and probes
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<GatewayEvent>>,
}

impl CollectingSink {
    /// Create an empty collecting sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events delivered so far, in delivery order
    pub fn events(&self) -> Vec<GatewayEvent> {
        self.events.lock().clone()
    }

    /// Number of events delivered so far
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether nothing has been delivered yet
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl DispatchSink for CollectingSink {
    fn dispatch(&self, event: GatewayEvent) {
        self.events.lock().push(event);
    }
}
