//! Response Generator - best-effort story judging and preference reactions.
//!
//! Wraps the AI provider port and converts every failure (timeout, network,
//! unparseable reply) into a fixed fallback value. Judging is enrichment,
//! never a gate: the caller can always proceed to coupon issuance.

use std::sync::Arc;
use tracing::warn;

use crate::domain::StoryEvaluation;
use crate::ports::{AIProvider, CompletionRequest, MessageRole};

/// Score awarded when the judge is unavailable.
pub const FALLBACK_SCORE: u8 = 7;

/// Comment used when the judge is unavailable.
pub const FALLBACK_COMMENT: &str = "Great story! Thanks for sharing.";

/// Reaction used when the provider is unavailable (preference mode).
pub const FALLBACK_REACTION: &str = "Ooh, excellent taste! A donut lover after my own heart.";

const STORY_JUDGE_PROMPT: &str = "You are a fun, enthusiastic donut story judge. \
    The user will share a donut-related story. \
    Rate it from 1 to 10 and give a short, encouraging comment. \
    Respond ONLY with valid JSON: {\"score\": <int>, \"comment\": \"<string>\"}";

const REACTION_PROMPT: &str = "You are a friendly donut fairy at a tech conference. \
    The user will tell you their dream donut or favorite flavor. \
    React with one short, warm, playful sentence. Plain text only.";

/// Turns visitor text into an evaluation or a reaction via the AI provider.
pub struct ResponseGenerator {
    provider: Arc<dyn AIProvider>,
    max_tokens: u32,
}

impl ResponseGenerator {
    /// Creates a generator over the given provider.
    pub fn new(provider: Arc<dyn AIProvider>, max_tokens: u32) -> Self {
        Self {
            provider,
            max_tokens,
        }
    }

    /// Judge a story. Infallible: a provider failure or an unparseable
    /// reply yields the fallback evaluation.
    pub async fn evaluate(&self, story: &str) -> StoryEvaluation {
        let request = CompletionRequest::new()
            .with_system_prompt(STORY_JUDGE_PROMPT)
            .with_message(MessageRole::User, story)
            .with_max_tokens(self.max_tokens);

        match self.provider.complete(request).await {
            Ok(response) => StoryEvaluation::parse(&response.content).unwrap_or_else(|| {
                warn!("judge reply was not the expected JSON, using fallback evaluation");
                fallback_evaluation()
            }),
            Err(err) => {
                warn!(error = %err, "story evaluation unavailable, using fallback");
                fallback_evaluation()
            }
        }
    }

    /// React to a stated preference. Infallible: a provider failure or an
    /// empty reply yields the fallback reaction.
    pub async fn react(&self, preference: &str) -> String {
        let request = CompletionRequest::new()
            .with_system_prompt(REACTION_PROMPT)
            .with_message(MessageRole::User, preference)
            .with_max_tokens(self.max_tokens);

        match self.provider.complete(request).await {
            Ok(response) => {
                let reaction = response.content.trim();
                if reaction.is_empty() {
                    warn!("reaction reply was empty, using fallback");
                    FALLBACK_REACTION.to_string()
                } else {
                    reaction.to_string()
                }
            }
            Err(err) => {
                warn!(error = %err, "reaction unavailable, using fallback");
                FALLBACK_REACTION.to_string()
            }
        }
    }
}

fn fallback_evaluation() -> StoryEvaluation {
    StoryEvaluation {
        score: FALLBACK_SCORE,
        comment: FALLBACK_COMMENT.to_string(),
    }
}
