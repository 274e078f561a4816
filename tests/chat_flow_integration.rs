//! Integration tests for the full coupon conversation flow.
//!
//! These tests wire the real message handler against the in-memory session
//! store and the mock AI provider, driving whole conversations end to end:
//! 1. Welcome -> story -> coupon -> idempotent re-query
//! 2. Minimum-length gating in story mode
//! 3. Provider failure degrading to the fallback reply
//! 4. Preference mode
//! 5. The chat envelope wiring around the handler

use std::sync::Arc;

use fetch_a_donut::adapters::ai::{MockAIProvider, MockError};
use fetch_a_donut::adapters::http::chat::{ChatMessageRequest, ChatMessageResponse};
use fetch_a_donut::adapters::storage::InMemorySessionStore;
use fetch_a_donut::application::response_generator::{FALLBACK_COMMENT, FALLBACK_REACTION};
use fetch_a_donut::application::{
    EngagementSettings, HandleChatMessageCommand, HandleChatMessageHandler, ResponseGenerator,
};
use fetch_a_donut::domain::{CouponCode, EngagementMode, SessionKey, SessionPhase};
use fetch_a_donut::ports::SessionStore;

// =============================================================================
// Test Infrastructure
// =============================================================================

const SESSION: &str = "conv-0001";
const SENDER: &str = "agent1qvisitor";

fn settings(mode: EngagementMode) -> EngagementSettings {
    EngagementSettings {
        conference_id: "FETCH25".to_string(),
        conference_name: "Fetch Summit 2025".to_string(),
        conference_start_date: "Oct 14".to_string(),
        conference_end_date: "Oct 16".to_string(),
        coupon_prefix: "DONUT".to_string(),
        min_story_length: 20,
        mode,
    }
}

fn build_handler(
    provider: MockAIProvider,
    mode: EngagementMode,
) -> (HandleChatMessageHandler, Arc<InMemorySessionStore>) {
    let store = Arc::new(InMemorySessionStore::new());
    let handler = HandleChatMessageHandler::new(
        store.clone(),
        ResponseGenerator::new(Arc::new(provider), 256),
        settings(mode),
    );
    (handler, store)
}

async fn send(
    handler: &HandleChatMessageHandler,
    text: &str,
) -> fetch_a_donut::application::HandleChatMessageResult {
    handler
        .handle(HandleChatMessageCommand {
            session_key: SessionKey::new(SESSION),
            sender: SENDER.to_string(),
            text: text.to_string(),
        })
        .await
        .expect("handler should not fail")
}

async fn stored_coupon(store: &InMemorySessionStore) -> CouponCode {
    store
        .get(&SessionKey::new(SESSION))
        .await
        .unwrap()
        .expect("session should exist")
        .coupon()
        .cloned()
        .expect("session should be completed")
}

// =============================================================================
// Story mode scenario
// =============================================================================

#[tokio::test]
async fn full_story_conversation_issues_and_repeats_coupon() {
    let provider =
        MockAIProvider::new().with_response(r#"{"score": 9, "comment": "A legendary tale!"}"#);
    let (handler, store) = build_handler(provider, EngagementMode::Story);

    // 1. Fresh session: welcome prompt, no coupon yet
    let welcome = send(&handler, "hi").await;
    assert!(welcome.reply.contains("Welcome to Fetch-a-Donut"));
    assert!(!welcome.end_session);

    let session = store.get(&SessionKey::new(SESSION)).await.unwrap().unwrap();
    assert_eq!(session.phase(), &SessionPhase::AwaitingInput);

    // 2. Five characters is below the 20-character minimum
    let retry = send(&handler, "donut").await;
    assert!(retry.reply.contains("bit short"));
    assert!(!retry.end_session);

    let session = store.get(&SessionKey::new(SESSION)).await.unwrap().unwrap();
    assert_eq!(session.phase(), &SessionPhase::AwaitingInput);

    // 3. A real story completes the session
    let reward = send(&handler, "A donut once rolled a mile to reach me.").await;
    assert!(reward.end_session);
    assert!(reward.reply.contains("A legendary tale!"));
    assert!(reward.reply.contains("Story Rating: 9/10"));

    let coupon = stored_coupon(&store).await;
    assert!(reward.reply.contains(coupon.as_str()));

    // Coupon shape: DONUT-FETCH25-XXXXXX-HHMM
    let segments: Vec<&str> = coupon.as_str().split('-').collect();
    assert_eq!(segments.len(), 4);
    assert_eq!(segments[0], "DONUT");
    assert_eq!(segments[1], "FETCH25");
    assert_eq!(segments[2].len(), 6);
    assert!(segments[2]
        .chars()
        .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    assert_eq!(segments[3].len(), 4);
    assert!(segments[3].chars().all(|c| c.is_ascii_digit()));

    // 4. Any further message re-emits the identical coupon and closes again
    let repeat = send(&handler, "one more?").await;
    assert!(repeat.end_session);
    assert!(repeat.reply.contains("already received"));
    assert!(repeat.reply.contains(coupon.as_str()));

    let still_stored = stored_coupon(&store).await;
    assert_eq!(still_stored, coupon);
}

#[tokio::test]
async fn short_story_never_reaches_the_judge() {
    let provider = MockAIProvider::new();
    let (handler, store) = build_handler(provider.clone(), EngagementMode::Story);

    send(&handler, "hi").await;
    send(&handler, "tiny").await;

    assert_eq!(provider.call_count(), 0);
    let session = store.get(&SessionKey::new(SESSION)).await.unwrap().unwrap();
    assert!(session.coupon().is_none());
}

#[tokio::test]
async fn judge_timeout_still_completes_with_fallback() {
    let provider = MockAIProvider::new().with_error(MockError::Timeout { timeout_secs: 30 });
    let (handler, store) = build_handler(provider, EngagementMode::Story);

    send(&handler, "hi").await;
    let reward = send(&handler, "The day a donut saved my demo at the booth.").await;

    assert!(reward.end_session);
    assert!(reward.reply.contains(FALLBACK_COMMENT));
    assert!(reward.reply.contains("Story Rating: 7/10"));

    let coupon = stored_coupon(&store).await;
    assert!(reward.reply.contains(coupon.as_str()));
}

#[tokio::test]
async fn unparseable_judge_reply_falls_back() {
    let provider = MockAIProvider::new().with_response("Nine out of ten, easily!");
    let (handler, _store) = build_handler(provider, EngagementMode::Story);

    send(&handler, "hi").await;
    let reward = send(&handler, "The day a donut saved my demo at the booth.").await;

    assert!(reward.reply.contains(FALLBACK_COMMENT));
    assert!(reward.reply.contains("Story Rating: 7/10"));
}

// =============================================================================
// Preference mode scenario
// =============================================================================

#[tokio::test]
async fn preference_conversation_accepts_short_answers() {
    let provider = MockAIProvider::new().with_response("A glazed classicist, wonderful!");
    let (handler, store) = build_handler(provider, EngagementMode::Preference);

    let welcome = send(&handler, "hello").await;
    assert!(welcome.reply.contains("dream donut"));

    let reward = send(&handler, "glazed").await;
    assert!(reward.end_session);
    assert!(reward.reply.contains("A glazed classicist, wonderful!"));
    assert!(!reward.reply.contains("Story Rating"));

    let coupon = stored_coupon(&store).await;
    assert!(coupon.as_str().starts_with("DONUT-FETCH25-"));
}

#[tokio::test]
async fn preference_provider_failure_uses_fallback_reaction() {
    let provider = MockAIProvider::new().with_error(MockError::Unavailable {
        message: "service down".to_string(),
    });
    let (handler, _store) = build_handler(provider, EngagementMode::Preference);

    send(&handler, "hello").await;
    let reward = send(&handler, "maple bacon").await;

    assert!(reward.end_session);
    assert!(reward.reply.contains(FALLBACK_REACTION));
}

// =============================================================================
// Chat envelope wiring
// =============================================================================

#[test]
fn protocol_envelope_round_trips_through_dtos() {
    let inbound: ChatMessageRequest = serde_json::from_str(
        r#"{
            "msg_id": "7f8a1c2e-4b6d-4f7a-9c3e-2d1b5a6c7d8e",
            "timestamp": "2025-10-14T09:41:00Z",
            "session_id": "conv-0001",
            "sender": "agent1qvisitor",
            "content": [
                {"type": "text", "text": "hi "},
                {"type": "metadata", "fields": {"client": "mobile"}},
                {"type": "text", "text": "there"}
            ]
        }"#,
    )
    .expect("protocol envelope should deserialize");

    assert_eq!(inbound.text(), "hi there");

    let reply = ChatMessageResponse::reply(inbound.msg_id, "Your coupon awaits", true);
    let json = serde_json::to_value(&reply).unwrap();

    assert_eq!(
        json["acknowledged_msg_id"],
        "7f8a1c2e-4b6d-4f7a-9c3e-2d1b5a6c7d8e"
    );
    assert_eq!(json["content"][0]["type"], "text");
    assert_eq!(json["content"][1]["type"], "end-session");
}
