//! Axum routes for the chat endpoint.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{get_agent_card, health, post_chat_message, ChatAppState};

/// Creates routes for the chat endpoints.
///
/// Endpoints:
/// - POST /api/chat - Handle one inbound chat message
/// - GET /api/agent - Agent metadata
/// - GET /health - Liveness probe
pub fn chat_routes() -> Router<ChatAppState> {
    Router::new()
        .route("/api/chat", post(post_chat_message))
        .route("/api/agent", get(get_agent_card))
        .route("/health", get(health))
}
