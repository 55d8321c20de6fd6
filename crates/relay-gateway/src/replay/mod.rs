//! Replay control - per-guild backlog and ordered processing

mod backlog;
mod processor;

pub use backlog::GuildBacklog;
pub use processor::EventProcessor;
