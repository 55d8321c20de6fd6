//! Test fixtures: an in-process pipeline harness and payload builders

use std::sync::Arc;

use serde_json::{json, Value};

use relay_cache::{EntityCaches, GuildSetupTracker};
use relay_core::{
    GatewayEvent, Guild, PrivateChannel, RawEvent, Snowflake, TextChannel, User,
};
use relay_gateway::{
    CollectingSink, EventDispatcher, EventProcessor, EventPump, GatewayState,
};

/// Fully wired pipeline over empty caches and a collecting sink
pub struct Harness {
    pub processor: Arc<EventProcessor>,
    pub sink: Arc<CollectingSink>,
}

impl Harness {
    #[must_use]
    pub fn new() -> Self {
        let caches = EntityCaches::new_shared();
        let setup = GuildSetupTracker::new_shared();
        let sink = Arc::new(CollectingSink::new());
        let dispatcher = EventDispatcher::new_shared(sink.clone());
        let state = GatewayState::new(caches, setup, dispatcher);
        Self {
            processor: Arc::new(EventProcessor::new(state)),
            sink,
        }
    }

    pub fn state(&self) -> &GatewayState {
        self.processor.state()
    }

    pub fn caches(&self) -> &EntityCaches {
        self.state().caches()
    }

    /// An async pump over this harness's processor
    #[must_use]
    pub fn pump(&self) -> EventPump {
        EventPump::new(Arc::clone(&self.processor))
    }

    /// Snapshot of everything dispatched so far, in delivery order
    pub fn dispatched(&self) -> Vec<GatewayEvent> {
        self.sink.events()
    }

    pub fn seed_user(&self, id: u64, username: &str) -> Arc<User> {
        let user = Arc::new(User::new(
            Snowflake::new(id),
            username.to_string(),
            "0001".to_string(),
        ));
        self.caches().users().insert(user.id, Arc::clone(&user));
        user
    }

    pub fn seed_guild(&self, id: u64, name: &str, owner_id: u64) -> Guild {
        let guild = Guild::new(Snowflake::new(id), name.to_string(), Snowflake::new(owner_id));
        self.caches().guilds().insert(guild.id, guild.clone());
        guild
    }

    pub fn seed_text_channel(&self, id: u64, guild_id: u64, name: &str) -> TextChannel {
        let channel = TextChannel::new(Snowflake::new(id), Snowflake::new(guild_id), name.to_string());
        self.caches().text_channels().insert(channel.id, channel.clone());
        channel
    }

    pub fn seed_private_channel(&self, id: u64, recipient: Arc<User>) -> PrivateChannel {
        let channel = PrivateChannel::new(Snowflake::new(id), recipient);
        self.caches()
            .private_channels()
            .insert(channel.id, channel.clone());
        channel
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TYPING_START` payloads
pub struct TypingPayload {
    guild_id: Option<u64>,
    channel_id: u64,
    user_id: u64,
    timestamp: i64,
    member: Option<Value>,
}

impl TypingPayload {
    #[must_use]
    pub fn new(channel_id: u64, user_id: u64) -> Self {
        Self {
            guild_id: None,
            channel_id,
            user_id,
            timestamp: 1000,
            member: None,
        }
    }

    #[must_use]
    pub fn guild(mut self, guild_id: u64) -> Self {
        self.guild_id = Some(guild_id);
        self
    }

    #[must_use]
    pub fn timestamp(mut self, seconds: i64) -> Self {
        self.timestamp = seconds;
        self
    }

    #[must_use]
    pub fn member(mut self, member: Value) -> Self {
        self.member = Some(member);
        self
    }

    /// Assemble the raw event
    ///
    /// # Panics
    /// Never; the assembled document is always a JSON object.
    #[must_use]
    pub fn build(self) -> RawEvent {
        let mut data = json!({
            "channel_id": self.channel_id.to_string(),
            "user_id": self.user_id.to_string(),
            "timestamp": self.timestamp,
        });
        if let Some(guild_id) = self.guild_id {
            data["guild_id"] = json!(guild_id.to_string());
        }
        if let Some(member) = self.member {
            data["member"] = member;
        }
        RawEvent::new("TYPING_START", data).unwrap()
    }
}

/// A minimal member document carrying a full nested user
#[must_use]
pub fn member_doc(user_id: u64, username: &str, nick: &str) -> Value {
    json!({
        "nick": nick,
        "joined_at": "2024-06-01T12:00:00Z",
        "roles": [],
        "user": {"id": user_id.to_string(), "username": username}
    })
}

/// Assemble a `MESSAGE_REACTION_ADD` raw event
///
/// # Panics
/// Never; the assembled document is always a JSON object.
#[must_use]
pub fn reaction_payload(guild_id: u64, channel_id: u64, user_id: u64, message_id: u64, emoji: &str) -> RawEvent {
    RawEvent::new(
        "MESSAGE_REACTION_ADD",
        json!({
            "guild_id": guild_id.to_string(),
            "channel_id": channel_id.to_string(),
            "user_id": user_id.to_string(),
            "message_id": message_id.to_string(),
            "emoji": {"name": emoji}
        }),
    )
    .unwrap()
}
