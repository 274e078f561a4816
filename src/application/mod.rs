//! Application layer - orchestrates domain operations over the ports.

pub mod handlers;
pub mod response_generator;

pub use handlers::{
    EngagementSettings, HandleChatMessageCommand, HandleChatMessageError,
    HandleChatMessageHandler, HandleChatMessageResult,
};
pub use response_generator::ResponseGenerator;
