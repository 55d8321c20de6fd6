//! Event dispatch - sequencing and delivery of resolved events

mod dispatcher;
mod sink;

pub use dispatcher::EventDispatcher;
pub use sink::{BroadcastSink, CollectingSink, DispatchSink};
