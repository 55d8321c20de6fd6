//! Gateway event types
//!
//! Wire names for the event kinds this core resolves. The remote service
//! adds kinds over time; names that are not recognized here are simply not
//! resolvable and are ignored by the router.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Resolvable gateway event kinds
///
/// These are the event names carried in the type field of dispatch frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayEventType {
    /// A user started typing in a channel
    TypingStart,
    /// A reaction was added to a message
    MessageReactionAdd,
}

impl GatewayEventType {
    /// Get the wire name of this event type
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TypingStart => "TYPING_START",
            Self::MessageReactionAdd => "MESSAGE_REACTION_ADD",
        }
    }

    /// Parse a wire name; unknown names yield `None`
    #[must_use]
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "TYPING_START" => Some(Self::TypingStart),
            "MESSAGE_REACTION_ADD" => Some(Self::MessageReactionAdd),
            _ => None,
        }
    }
}

impl fmt::Display for GatewayEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
