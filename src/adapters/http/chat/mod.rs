//! Chat endpoint adapter - the agent's inbound/outbound message surface.

mod dto;
mod handlers;
mod routes;

pub use dto::{AgentCard, ChatMessageRequest, ChatMessageResponse, ContentItem, ErrorResponse};
pub use handlers::{ChatApiError, ChatAppState};
pub use routes::chat_routes;
