//! HTTP handlers for the chat endpoint.
//!
//! These handlers connect Axum routes to the application layer.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::{HandleChatMessageCommand, HandleChatMessageHandler};
use crate::domain::SessionKey;

use super::dto::{AgentCard, ChatMessageRequest, ChatMessageResponse, ErrorResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for chat handlers.
#[derive(Clone)]
pub struct ChatAppState {
    pub handler: Arc<HandleChatMessageHandler>,
    pub agent_card: Arc<AgentCard>,
}

impl ChatAppState {
    /// Creates a new ChatAppState.
    pub fn new(handler: Arc<HandleChatMessageHandler>, agent_card: AgentCard) -> Self {
        Self {
            handler,
            agent_card: Arc::new(agent_card),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// POST /api/chat
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/chat - Handle one inbound chat message.
///
/// Returns the reply envelope, acknowledging the inbound msg_id and
/// carrying the end-session marker on terminal replies.
///
/// # Errors
/// - 400 Bad Request: sender address is empty
/// - 500 Internal Server Error: session store failure
pub async fn post_chat_message(
    State(state): State<ChatAppState>,
    Json(envelope): Json<ChatMessageRequest>,
) -> Result<Json<ChatMessageResponse>, ChatApiError> {
    if envelope.sender.trim().is_empty() {
        return Err(ChatApiError::BadRequest(
            "Sender address must not be empty".to_string(),
        ));
    }

    let cmd = HandleChatMessageCommand {
        session_key: SessionKey::new(&envelope.session_id),
        sender: envelope.sender.clone(),
        text: envelope.text(),
    };

    let result = state
        .handler
        .handle(cmd)
        .await
        .map_err(|e| ChatApiError::Internal(e.to_string()))?;

    Ok(Json(ChatMessageResponse::reply(
        envelope.msg_id,
        result.reply,
        result.end_session,
    )))
}

// ════════════════════════════════════════════════════════════════════════════════
// GET /api/agent
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/agent - Agent metadata (name, description, readme).
pub async fn get_agent_card(State(state): State<ChatAppState>) -> Json<AgentCard> {
    Json(state.agent_card.as_ref().clone())
}

// ════════════════════════════════════════════════════════════════════════════════
// GET /health
// ════════════════════════════════════════════════════════════════════════════════

/// GET /health - Liveness probe.
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ════════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════════

/// API-level errors for the chat endpoint.
#[derive(Debug)]
pub enum ChatApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ChatApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ChatApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            ChatApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal("An internal error occurred"),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::http::chat::ContentItem;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::application::{EngagementSettings, ResponseGenerator};
    use crate::domain::EngagementMode;
    use chrono::Utc;
    use uuid::Uuid;

    fn test_state() -> ChatAppState {
        let store = Arc::new(InMemorySessionStore::new());
        let generator = ResponseGenerator::new(Arc::new(MockAIProvider::new()), 256);
        let handler = HandleChatMessageHandler::new(
            store,
            generator,
            EngagementSettings {
                conference_id: "FETCH25".to_string(),
                conference_name: "Fetch Summit 2025".to_string(),
                conference_start_date: "Oct 14".to_string(),
                conference_end_date: "Oct 16".to_string(),
                coupon_prefix: "DONUT".to_string(),
                min_story_length: 20,
                mode: EngagementMode::Story,
            },
        );
        ChatAppState::new(
            Arc::new(handler),
            AgentCard {
                name: "fetch-a-donut".to_string(),
                description: "A donut coupon agent".to_string(),
                readme: "# Fetch-a-Donut".to_string(),
            },
        )
    }

    fn envelope(text: &str, sender: &str) -> ChatMessageRequest {
        ChatMessageRequest {
            msg_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            session_id: "conv-123".to_string(),
            sender: sender.to_string(),
            content: vec![ContentItem::text(text)],
        }
    }

    #[tokio::test]
    async fn post_chat_message_acknowledges_inbound_id() {
        let state = test_state();
        let request = envelope("hi", "agent1qsender");
        let inbound_id = request.msg_id;

        let Json(reply) = post_chat_message(State(state), Json(request)).await.unwrap();

        assert_eq!(reply.acknowledged_msg_id, inbound_id);
        assert!(!reply.ends_session());
    }

    #[tokio::test]
    async fn post_chat_message_rejects_empty_sender() {
        let state = test_state();
        let request = envelope("hi", "  ");

        let result = post_chat_message(State(state), Json(request)).await;

        assert!(matches!(result, Err(ChatApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn get_agent_card_returns_metadata() {
        let state = test_state();

        let Json(card) = get_agent_card(State(state)).await;

        assert_eq!(card.name, "fetch-a-donut");
    }
}
