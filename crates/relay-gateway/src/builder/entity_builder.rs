//! Entity builder
//!
//! Constructs and updates cache entries from raw payload fragments. Events
//! can carry fresh entity data inline (e.g. a `member` document on a typing
//! event); the builder materializes those fragments into cached entities so
//! later events resolve against up-to-date state.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use relay_cache::EntityCaches;
use relay_core::{Guild, GuildMember, PayloadError, RawObject, User};

/// Builds cache entries from nested payload documents
#[derive(Debug, Clone)]
pub struct EntityBuilder {
    caches: Arc<EntityCaches>,
}

impl EntityBuilder {
    /// Create a builder writing into the given caches
    #[must_use]
    pub fn new(caches: Arc<EntityCaches>) -> Self {
        Self { caches }
    }

    /// Construct or refresh a user from a nested user document
    ///
    /// A document carrying a `username` refreshes the cache entry
    /// (last-write-wins); a bare `{id}` reference resolves against the
    /// cache. An unseen ID without a username cannot be materialized.
    pub fn create_user(&self, doc: RawObject<'_>) -> Result<Arc<User>, PayloadError> {
        let id = doc.snowflake("id")?;

        match doc.optional_string("username")? {
            Some(username) => {
                let user = Arc::new(User {
                    id,
                    username: username.to_string(),
                    discriminator: doc
                        .optional_string("discriminator")?
                        .unwrap_or("0000")
                        .to_string(),
                    avatar: doc.optional_string("avatar")?.map(ToString::to_string),
                    bot: doc.bool_or_false("bot")?,
                });
                self.caches.users().insert(id, Arc::clone(&user));
                tracing::trace!(user_id = %id, "User cache entry refreshed from payload");
                Ok(user)
            }
            None => self
                .caches
                .users()
                .get(id)
                .ok_or(PayloadError::MissingField("username")),
        }
    }

    /// Construct a member from a nested member document
    ///
    /// Resolves or creates the embedded user as a side effect. The returned
    /// member is not cached yet; pair with [`Self::update_member_cache`].
    pub fn create_member(
        &self,
        guild: &Guild,
        doc: RawObject<'_>,
    ) -> Result<GuildMember, PayloadError> {
        let user = self.create_user(doc.object("user")?)?;

        let joined_at = match doc.optional_string("joined_at")? {
            Some(raw) => DateTime::parse_from_rfc3339(raw)
                .map_err(|_| PayloadError::invalid("joined_at", "RFC 3339 timestamp"))?
                .with_timezone(&Utc),
            None => Utc::now(),
        };

        Ok(GuildMember {
            guild_id: guild.id,
            user,
            nickname: doc.optional_string("nick")?.map(ToString::to_string),
            role_ids: doc.snowflake_list("roles")?,
            joined_at,
        })
    }

    /// Insert or replace the member's cache entry, keyed by (guild, user)
    ///
    /// Idempotent; concurrent updates for the same key are last-write-wins.
    pub fn update_member_cache(&self, member: &GuildMember) {
        self.caches.members().insert(member.clone());
        tracing::trace!(
            guild_id = %member.guild_id,
            user_id = %member.user_id(),
            "Member cache entry updated"
        );
    }
}
