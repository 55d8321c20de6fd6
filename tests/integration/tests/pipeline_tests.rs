//! End-to-end tests for the event resolution pipeline
//!
//! Every test runs fully in-process: payloads go in through the
//! processor (or the async pump), resolved events come out of a
//! collecting sink.
//!
//! Run with: cargo test -p integration-tests --test pipeline_tests

use integration_tests::{member_doc, reaction_payload, Harness, TypingPayload};

use chrono::{TimeZone, Utc};
use relay_core::{GatewayEventType, PayloadError, RawEvent, Snowflake};
use relay_gateway::{HandleOutcome, HandlerError};
use serde_json::json;

// ============================================================================
// Guild-lock deferral
// ============================================================================

#[test]
fn test_locked_guild_defers_without_side_effects() {
    let harness = Harness::new();
    harness.seed_guild(1, "guild", 9);
    harness.seed_text_channel(20, 1, "general");
    harness.seed_user(30, "quokka");
    let writes_before = harness.caches().write_count();

    harness.state().setup().begin_setup(Snowflake::new(1));

    let outcome = harness
        .processor
        .process(TypingPayload::new(20, 30).guild(1).build())
        .unwrap();

    assert_eq!(outcome, HandleOutcome::Retry(Snowflake::new(1)));
    assert_eq!(harness.processor.backlog().pending(Snowflake::new(1)), 1);
    assert_eq!(harness.caches().write_count(), writes_before);
    assert_eq!(harness.state().dispatcher().dispatch_count(), 0);
}

#[test]
fn test_deferred_events_replay_in_order_after_unlock() {
    let harness = Harness::new();
    harness.seed_guild(1, "guild", 9);
    harness.seed_text_channel(20, 1, "general");
    harness.seed_user(30, "quokka");

    harness.state().setup().begin_setup(Snowflake::new(1));
    for seconds in [1000, 2000, 3000] {
        let outcome = harness
            .processor
            .process(TypingPayload::new(20, 30).guild(1).timestamp(seconds).build())
            .unwrap();
        assert_eq!(outcome, HandleOutcome::Retry(Snowflake::new(1)));
    }

    let replayed = harness.processor.guild_ready(Snowflake::new(1)).unwrap();
    assert_eq!(replayed, 3);
    assert_eq!(harness.processor.backlog().pending(Snowflake::new(1)), 0);

    let events = harness.dispatched();
    assert_eq!(events.len(), 3);
    for (i, event) in events.iter().enumerate() {
        // Sequence numbers stamped in replay order, payload order preserved
        assert_eq!(event.response_number(), i as u64 + 1);
    }
}

#[test]
fn test_arrival_queues_behind_nonempty_backlog() {
    let harness = Harness::new();
    harness.seed_guild(1, "guild", 9);
    harness.seed_text_channel(20, 1, "general");
    harness.seed_user(30, "quokka");

    harness.state().setup().begin_setup(Snowflake::new(1));
    harness
        .processor
        .process(TypingPayload::new(20, 30).guild(1).timestamp(1000).build())
        .unwrap();

    // The guild unlocks, but its backlog has not drained yet. A payload
    // arriving now must not overtake the deferred one.
    harness.state().setup().mark_ready(Snowflake::new(1));
    let outcome = harness
        .processor
        .process(TypingPayload::new(20, 30).guild(1).timestamp(2000).build())
        .unwrap();
    assert_eq!(outcome, HandleOutcome::Retry(Snowflake::new(1)));

    let replayed = harness.processor.guild_ready(Snowflake::new(1)).unwrap();
    assert_eq!(replayed, 2);

    let events = harness.dispatched();
    let timestamps: Vec<i64> = events.iter().map(|e| match e {
        relay_core::GatewayEvent::TypingStart(e) => e.timestamp.timestamp(),
        relay_core::GatewayEvent::ReactionAdd(_) => unreachable!(),
    }).collect();
    assert_eq!(timestamps, vec![1000, 2000]);
}

#[test]
fn test_guild_ready_on_guild_with_no_backlog() {
    let harness = Harness::new();
    harness.state().setup().begin_setup(Snowflake::new(1));

    let replayed = harness.processor.guild_ready(Snowflake::new(1)).unwrap();
    assert_eq!(replayed, 0);
    assert!(!harness.state().setup().is_locked(Snowflake::new(1)));
}

#[test]
fn test_malformed_deferred_payload_aborts_and_resumes() {
    let harness = Harness::new();
    harness.seed_guild(1, "guild", 9);
    harness.seed_text_channel(20, 1, "general");
    harness.seed_user(30, "quokka");

    harness.state().setup().begin_setup(Snowflake::new(1));
    // First deferred payload lacks channel_id entirely
    let bad = RawEvent::new(
        "TYPING_START",
        json!({"guild_id": "1", "user_id": "30", "timestamp": 1000}),
    )
    .unwrap();
    harness.processor.process(bad).unwrap();
    harness
        .processor
        .process(TypingPayload::new(20, 30).guild(1).build())
        .unwrap();

    let err = harness.processor.guild_ready(Snowflake::new(1)).unwrap_err();
    assert!(matches!(
        err,
        HandlerError::Payload(PayloadError::MissingField("channel_id"))
    ));
    // Both payloads still queued; the malformed one stays at the front
    assert_eq!(harness.processor.backlog().pending(Snowflake::new(1)), 2);
}

// ============================================================================
// Drop semantics
// ============================================================================

#[test]
fn test_uncached_channel_drops_event() {
    let harness = Harness::new();
    harness.seed_user(30, "quokka");
    let writes_before = harness.caches().write_count();

    let outcome = harness
        .processor
        .process(TypingPayload::new(404, 30).guild(1).build())
        .unwrap();

    assert_eq!(outcome, HandleOutcome::Drop);
    assert_eq!(harness.processor.backlog().pending(Snowflake::new(1)), 0);
    assert_eq!(harness.caches().write_count(), writes_before);
    assert_eq!(harness.state().dispatcher().dispatch_count(), 0);
}

#[test]
fn test_uncached_user_drops_event() {
    let harness = Harness::new();
    harness.seed_guild(1, "guild", 9);
    harness.seed_text_channel(20, 1, "general");
    let writes_before = harness.caches().write_count();

    let outcome = harness
        .processor
        .process(TypingPayload::new(20, 404).guild(1).build())
        .unwrap();

    assert_eq!(outcome, HandleOutcome::Drop);
    assert_eq!(harness.caches().write_count(), writes_before);
    assert_eq!(harness.state().dispatcher().dispatch_count(), 0);
}

#[test]
fn test_member_document_for_uncached_guild_drops_event() {
    let harness = Harness::new();
    harness.seed_text_channel(20, 1, "general");
    harness.seed_user(30, "quokka");
    let writes_before = harness.caches().write_count();

    let payload = TypingPayload::new(20, 30)
        .guild(1)
        .member(member_doc(30, "quokka", "Q"))
        .build();
    let outcome = harness.processor.process(payload).unwrap();

    assert_eq!(outcome, HandleOutcome::Drop);
    // The nested member document must not leak user or member entries
    assert_eq!(harness.caches().write_count(), writes_before);
    assert_eq!(harness.caches().members().len(), 0);
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_guild_typing_event_resolves() {
    let harness = Harness::new();
    harness.seed_guild(1, "guild", 9);
    harness.seed_text_channel(20, 1, "general");
    let user = harness.seed_user(30, "quokka");

    let outcome = harness
        .processor
        .process(TypingPayload::new(20, 30).guild(1).timestamp(1000).build())
        .unwrap();
    assert_eq!(outcome, HandleOutcome::Done);

    let events = harness.dispatched();
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.event_type(), GatewayEventType::TypingStart);
    assert_eq!(event.response_number(), 1);
    assert_eq!(event.user(), &user);
    assert_eq!(event.channel().id(), Snowflake::new(20));
    assert_eq!(event.guild_id(), Some(Snowflake::new(1)));
    match event {
        relay_core::GatewayEvent::TypingStart(e) => {
            assert_eq!(e.timestamp, Utc.timestamp_opt(1000, 0).unwrap());
            assert!(e.member.is_none());
        }
        relay_core::GatewayEvent::ReactionAdd(_) => panic!("wrong event kind"),
    }
}

#[test]
fn test_private_channel_user_comes_from_recipient() {
    let harness = Harness::new();
    let recipient = std::sync::Arc::new(relay_core::User::new(
        Snowflake::new(30),
        "counterpart".to_string(),
        "0002".to_string(),
    ));
    // Recipient is deliberately NOT in the user cache
    harness.seed_private_channel(40, recipient.clone());

    let outcome = harness
        .processor
        .process(TypingPayload::new(40, 30).build())
        .unwrap();
    assert_eq!(outcome, HandleOutcome::Done);

    let events = harness.dispatched();
    assert_eq!(events[0].user(), &recipient);
    assert!(events[0].channel().is_private());
    assert_eq!(events[0].guild_id(), None);
}

#[test]
fn test_member_document_materializes_member() {
    let harness = Harness::new();
    harness.seed_guild(1, "guild", 9);
    harness.seed_text_channel(20, 1, "general");

    let payload = TypingPayload::new(20, 30)
        .guild(1)
        .member(member_doc(30, "quokka", "Q"))
        .build();
    let outcome = harness.processor.process(payload).unwrap();
    assert_eq!(outcome, HandleOutcome::Done);

    let cached = harness
        .caches()
        .members()
        .get(Snowflake::new(1), Snowflake::new(30))
        .unwrap();
    assert_eq!(cached.nickname.as_deref(), Some("Q"));

    let events = harness.dispatched();
    assert_eq!(events[0].member().unwrap(), &cached);
    assert_eq!(events[0].user().username, "quokka");
}

#[test]
fn test_nested_member_user_wins_over_cache() {
    let harness = Harness::new();
    harness.seed_guild(1, "guild", 9);
    harness.seed_text_channel(20, 1, "general");
    harness.seed_user(30, "stale-name");

    let payload = TypingPayload::new(20, 30)
        .guild(1)
        .member(member_doc(30, "fresh-name", "Q"))
        .build();
    harness.processor.process(payload).unwrap();

    // Both the event and the cache reflect the nested document
    let events = harness.dispatched();
    assert_eq!(events[0].user().username, "fresh-name");
    let cached = harness.caches().users().get(Snowflake::new(30)).unwrap();
    assert_eq!(cached.username, "fresh-name");
}

#[test]
fn test_member_replay_is_idempotent() {
    let harness = Harness::new();
    harness.seed_guild(1, "guild", 9);
    harness.seed_text_channel(20, 1, "general");

    for _ in 0..2 {
        let payload = TypingPayload::new(20, 30)
            .guild(1)
            .member(member_doc(30, "quokka", "Q"))
            .build();
        harness.processor.process(payload).unwrap();
    }

    assert_eq!(harness.caches().members().len(), 1);
    assert_eq!(harness.dispatched().len(), 2);
}

#[test]
fn test_reaction_event_resolves() {
    let harness = Harness::new();
    harness.seed_guild(1, "guild", 9);
    harness.seed_text_channel(20, 1, "general");
    harness.seed_user(30, "quokka");

    let outcome = harness
        .processor
        .process(reaction_payload(1, 20, 30, 77, "thumbsup"))
        .unwrap();
    assert_eq!(outcome, HandleOutcome::Done);

    match &harness.dispatched()[0] {
        relay_core::GatewayEvent::ReactionAdd(e) => {
            assert_eq!(e.message_id, Snowflake::new(77));
            assert_eq!(e.emoji, "thumbsup");
        }
        relay_core::GatewayEvent::TypingStart(_) => panic!("wrong event kind"),
    }
}

#[test]
fn test_unknown_event_type_is_ignored() {
    let harness = Harness::new();
    let payload = RawEvent::new("GUILD_BANNER_UPDATE", json!({"guild_id": "1"})).unwrap();

    let outcome = harness.processor.process(payload).unwrap();
    assert_eq!(outcome, HandleOutcome::Done);
    assert_eq!(harness.state().dispatcher().dispatch_count(), 0);
}

#[test]
fn test_missing_channel_id_is_a_hard_error() {
    let harness = Harness::new();
    let payload = RawEvent::new("TYPING_START", json!({"user_id": "30", "timestamp": 1})).unwrap();

    let err = harness.processor.process(payload).unwrap_err();
    assert!(matches!(
        err,
        HandlerError::Payload(PayloadError::MissingField("channel_id"))
    ));
}

// ============================================================================
// Async pump
// ============================================================================

#[tokio::test]
async fn test_pump_end_to_end_replay() {
    let harness = Harness::new();
    harness.seed_guild(1, "guild", 9);
    harness.seed_text_channel(20, 1, "general");
    harness.seed_user(30, "quokka");
    let pump = harness.pump();

    harness.state().setup().begin_setup(Snowflake::new(1));
    pump.submit(TypingPayload::new(20, 30).guild(1).timestamp(1000).build())
        .await
        .unwrap();
    pump.submit(TypingPayload::new(20, 30).guild(1).timestamp(2000).build())
        .await
        .unwrap();
    pump.guild_ready(Snowflake::new(1)).await;

    // Lane processing is asynchronous; poll the sink
    for _ in 0..100 {
        if harness.sink.len() == 2 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    let events = harness.dispatched();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].response_number(), 1);
    assert_eq!(events[1].response_number(), 2);
}

#[tokio::test]
async fn test_pump_built_from_config() {
    let harness = Harness::new();
    harness.seed_guild(1, "guild", 9);
    harness.seed_text_channel(20, 1, "general");
    harness.seed_user(30, "quokka");

    let config = relay_common::RelayConfig::default();
    let pump = relay_gateway::EventPump::from_config(harness.processor.clone(), &config);

    pump.submit(TypingPayload::new(20, 30).guild(1).build())
        .await
        .unwrap();

    for _ in 0..100 {
        if harness.sink.len() == 1 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert_eq!(harness.dispatched().len(), 1);
}

#[tokio::test]
async fn test_pump_distinct_guilds_are_independent() {
    let harness = Harness::new();
    for guild in [1u64, 2] {
        harness.seed_guild(guild, "guild", 9);
        harness.seed_text_channel(20 + guild, guild, "general");
    }
    harness.seed_user(30, "quokka");
    let pump = harness.pump();

    // Guild 1 is locked; guild 2 flows through immediately
    harness.state().setup().begin_setup(Snowflake::new(1));
    pump.submit(TypingPayload::new(21, 30).guild(1).build())
        .await
        .unwrap();
    pump.submit(TypingPayload::new(22, 30).guild(2).build())
        .await
        .unwrap();

    for _ in 0..100 {
        if harness.sink.len() == 1 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    let events = harness.dispatched();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].guild_id(), Some(Snowflake::new(2)));
    assert_eq!(harness.processor.backlog().pending(Snowflake::new(1)), 1);
}
