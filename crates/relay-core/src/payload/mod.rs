//! Raw payload wrappers - typed access over deserialized gateway documents

mod raw_event;

pub use raw_event::{RawEvent, RawObject};
