//! # relay-cache
//!
//! In-memory caching layer for gateway entities.
//!
//! ## Features
//!
//! - **Entity views**: concurrent ID-keyed caches for channels, users,
//!   guilds, and (guild, user)-keyed members
//! - **Setup tracking**: per-guild atomic lock flags for the initial
//!   synchronization phase
//!
//! All lookups are in-memory; nothing here blocks on I/O. Reads may be
//! stale relative to the remote service (eventual consistency), writes to
//! a given slot are atomic and last-write-wins.

pub mod setup;
pub mod view;

// Re-export view types
pub use view::{CacheView, EntityCaches, MemberCache};

// Re-export setup types
pub use setup::GuildSetupTracker;
