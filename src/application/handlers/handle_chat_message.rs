//! HandleChatMessageHandler - drives one inbound message through the
//! session state machine.
//!
//! The handler owns no ambient state: the session store and the response
//! generator are injected, so the whole conversation flow is testable
//! with in-memory fakes.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::application::response_generator::ResponseGenerator;
use crate::domain::{
    CouponCode, DomainError, EngagementMode, Session, SessionKey, SessionPhase, StoryEvaluation,
};
use crate::ports::{SessionStore, SessionStoreError};

/// Conference and engagement settings the handler composes replies from.
#[derive(Debug, Clone)]
pub struct EngagementSettings {
    pub conference_id: String,
    pub conference_name: String,
    pub conference_start_date: String,
    pub conference_end_date: String,
    pub coupon_prefix: String,
    pub min_story_length: usize,
    pub mode: EngagementMode,
}

/// Command for one inbound chat message
#[derive(Debug, Clone)]
pub struct HandleChatMessageCommand {
    pub session_key: SessionKey,
    /// Stable address of the sending user, as assigned by the framework.
    pub sender: String,
    /// Concatenated text content of the message.
    pub text: String,
}

/// Result of handling a chat message
#[derive(Debug, Clone)]
pub struct HandleChatMessageResult {
    /// Reply text to send back.
    pub reply: String,
    /// Whether the reply closes the session (end-session marker).
    pub end_session: bool,
}

/// Error type for handling chat messages
#[derive(Debug, Clone)]
pub enum HandleChatMessageError {
    /// Session store failure
    Storage(String),
    /// Domain invariant violation
    Domain(DomainError),
}

impl std::fmt::Display for HandleChatMessageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandleChatMessageError::Storage(err) => write!(f, "Storage error: {}", err),
            HandleChatMessageError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for HandleChatMessageError {}

impl From<SessionStoreError> for HandleChatMessageError {
    fn from(err: SessionStoreError) -> Self {
        HandleChatMessageError::Storage(err.to_string())
    }
}

impl From<DomainError> for HandleChatMessageError {
    fn from(err: DomainError) -> Self {
        HandleChatMessageError::Domain(err)
    }
}

/// Handler for inbound chat messages
pub struct HandleChatMessageHandler {
    store: Arc<dyn SessionStore>,
    generator: ResponseGenerator,
    settings: EngagementSettings,
}

impl HandleChatMessageHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        generator: ResponseGenerator,
        settings: EngagementSettings,
    ) -> Self {
        Self {
            store,
            generator,
            settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandleChatMessageCommand,
    ) -> Result<HandleChatMessageResult, HandleChatMessageError> {
        let text = cmd.text.trim();

        // 1. Load session state; absence means a brand-new conversation
        let mut session = self
            .store
            .get(&cmd.session_key)
            .await?
            .unwrap_or_else(|| Session::new(cmd.session_key.clone()));

        match session.phase().clone() {
            // 2a. Already rewarded: re-emit the same coupon, close again
            SessionPhase::Completed { coupon } => {
                info!(session = %session.key(), "re-sending existing coupon");
                Ok(HandleChatMessageResult {
                    reply: self.repeat_coupon_reply(&coupon),
                    end_session: true,
                })
            }

            // 2b. Waiting for the visitor's submission
            SessionPhase::AwaitingInput => self.accept_submission(session, &cmd.sender, text).await,

            // 2c. First contact: welcome and start waiting
            SessionPhase::New => {
                session.begin_awaiting_input()?;
                self.store.set(&session).await?;
                Ok(HandleChatMessageResult {
                    reply: self.welcome_reply(),
                    end_session: false,
                })
            }
        }
    }

    /// Validates and rewards a submission, completing the session.
    async fn accept_submission(
        &self,
        mut session: Session,
        sender: &str,
        text: &str,
    ) -> Result<HandleChatMessageResult, HandleChatMessageError> {
        // Story mode gates on a minimum length; a short message is a
        // retry prompt, not a transition
        if self.settings.mode == EngagementMode::Story
            && text.chars().count() < self.settings.min_story_length
        {
            return Ok(HandleChatMessageResult {
                reply: self.too_short_reply(),
                end_session: false,
            });
        }

        info!(sender = %sender_preview(sender), "judging submission");

        let coupon = CouponCode::derive(
            &self.settings.coupon_prefix,
            &self.settings.conference_id,
            sender,
            Utc::now(),
        );

        let reply = match self.settings.mode {
            EngagementMode::Story => {
                let evaluation = self.generator.evaluate(text).await;
                self.story_reward_reply(&evaluation, &coupon)
            }
            EngagementMode::Preference => {
                let reaction = self.generator.react(text).await;
                self.preference_reward_reply(&reaction, &coupon)
            }
        };

        session.complete(coupon)?;
        self.store.set(&session).await?;

        Ok(HandleChatMessageResult {
            reply,
            end_session: true,
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Reply composition
    // ─────────────────────────────────────────────────────────────────────

    fn welcome_reply(&self) -> String {
        match self.settings.mode {
            EngagementMode::Story => format!(
                "Welcome to Fetch-a-Donut at {}! I'm your friendly donut fairy!\n\n\
                 Before I can grant you a magical donut coupon, I need to hear your \
                 most epic donut story! Tell me about:\n\n\
                 - Your craziest donut adventure\n\
                 - Your dream donut combination\n\
                 - A time a donut saved your day\n\
                 - Or any donut-related tale!\n\n\
                 The more creative and fun your story, the better your rating! \
                 Go ahead, share your story now.",
                self.settings.conference_name
            ),
            EngagementMode::Preference => format!(
                "Welcome to Fetch-a-Donut at {}! I'm your friendly donut fairy!\n\n\
                 Before I can grant you a magical donut coupon, tell me about your \
                 dream donut: favorite flavor, topping, filling, anything. Go ahead!",
                self.settings.conference_name
            ),
        }
    }

    fn too_short_reply(&self) -> String {
        format!(
            "That's a bit short! Tell me a real donut story (at least {} characters). \
             I'm all ears!",
            self.settings.min_story_length
        )
    }

    fn story_reward_reply(&self, evaluation: &StoryEvaluation, coupon: &CouponCode) -> String {
        format!(
            "{}\n\n\
             Your Coupon Code: {}\n\n\
             This gets you a FREE donut of your choice!\n\
             Show this code to any food vendor at {} ({} - {}).\n\
             Story Rating: {}/10",
            evaluation.comment,
            coupon,
            self.settings.conference_name,
            self.settings.conference_start_date,
            self.settings.conference_end_date,
            evaluation.score
        )
    }

    fn preference_reward_reply(&self, reaction: &str, coupon: &CouponCode) -> String {
        format!(
            "{}\n\n\
             Your Coupon Code: {}\n\n\
             This gets you a FREE donut of your choice!\n\
             Show this code to any food vendor at {} ({} - {}).",
            reaction,
            coupon,
            self.settings.conference_name,
            self.settings.conference_start_date,
            self.settings.conference_end_date
        )
    }

    fn repeat_coupon_reply(&self, coupon: &CouponCode) -> String {
        format!(
            "You've already received your donut coupon this session!\n\n\
             Your coupon code: {}\n\n\
             Show this code to any food vendor at {} to claim your free donut.",
            coupon, self.settings.conference_name
        )
    }
}

/// Truncated sender address for log lines.
fn sender_preview(sender: &str) -> String {
    sender.chars().take(16).collect()
}
