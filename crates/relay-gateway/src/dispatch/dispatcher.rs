//! Event dispatcher
//!
//! Stamps each resolved event with the next monotonic response sequence
//! number and hands it to the configured sink.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use relay_core::GatewayEvent;

use super::DispatchSink;

/// Delivers resolved events to subscribers with monotonic sequencing
pub struct EventDispatcher {
    sink: Arc<dyn DispatchSink>,
    /// Sequence number for resolved events
    sequence: AtomicU64,
    /// Total events delivered; test probe for zero-dispatch guarantees
    dispatched: AtomicU64,
}

impl EventDispatcher {
    /// Create a dispatcher delivering into the given sink
    #[must_use]
    pub fn new(sink: Arc<dyn DispatchSink>) -> Self {
        Self {
            sink,
            sequence: AtomicU64::new(0),
            dispatched: AtomicU64::new(0),
        }
    }

    /// Create a dispatcher wrapped in Arc
    #[must_use]
    pub fn new_shared(sink: Arc<dyn DispatchSink>) -> Arc<Self> {
        Arc::new(Self::new(sink))
    }

    /// Get the next sequence number
    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Stamp and deliver one resolved event
    pub fn dispatch(&self, mut event: GatewayEvent) {
        let seq = self.next_sequence();
        event.set_response_number(seq);

        tracing::trace!(
            event_type = %event.event_type(),
            seq = seq,
            "Resolved event dispatched"
        );

        self.dispatched.fetch_add(1, Ordering::SeqCst);
        self.sink.dispatch(event);
    }

    /// Total number of events delivered so far
    pub fn dispatch_count(&self) -> u64 {
        self.dispatched.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("sequence", &self.sequence.load(Ordering::SeqCst))
            .field("dispatched", &self.dispatched.load(Ordering::SeqCst))
            .finish()
    }
}
