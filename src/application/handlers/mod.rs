//! Application handlers.

mod handle_chat_message;

pub use handle_chat_message::{
    EngagementSettings, HandleChatMessageCommand, HandleChatMessageError,
    HandleChatMessageHandler, HandleChatMessageResult,
};
