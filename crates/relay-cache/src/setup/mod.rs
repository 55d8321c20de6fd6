//! Guild setup state tracking

mod tracker;

pub use tracker::GuildSetupTracker;
