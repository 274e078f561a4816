//! Evaluation values produced by the response generator.
//!
//! A story submission is judged into a [`StoryEvaluation`]; a stated
//! preference just gets a free-form reaction string. Both are transient:
//! consumed when the reply is composed, never persisted.

use serde::{Deserialize, Serialize};

/// Lowest score the judge can award.
pub const MIN_SCORE: u8 = 1;
/// Highest score the judge can award.
pub const MAX_SCORE: u8 = 10;

/// Which engagement flow the agent runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EngagementMode {
    /// Collect a story, judge it, reward it.
    #[default]
    Story,
    /// Collect a stated preference and react to it.
    Preference,
}

/// Result of judging a story: a 1-10 score and a short comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryEvaluation {
    pub score: u8,
    pub comment: String,
}

impl StoryEvaluation {
    /// Creates an evaluation, clamping the score into the valid range.
    pub fn new(score: i64, comment: impl Into<String>) -> Self {
        Self {
            score: score.clamp(MIN_SCORE as i64, MAX_SCORE as i64) as u8,
            comment: comment.into(),
        }
    }

    /// Parses the judge model's reply.
    ///
    /// Accepts the JSON object the judge prompt asks for, optionally
    /// wrapped in a markdown code fence. Missing fields take the same
    /// defaults a partially-valid reply would get; anything that is not
    /// a JSON object yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let cleaned = strip_code_fence(raw.trim());
        let parsed: RawEvaluation = serde_json::from_str(cleaned).ok()?;
        Some(Self::new(parsed.score, parsed.comment))
    }
}

#[derive(Debug, Deserialize)]
struct RawEvaluation {
    #[serde(default = "default_score")]
    score: i64,
    #[serde(default = "default_comment")]
    comment: String,
}

fn default_score() -> i64 {
    7
}

fn default_comment() -> String {
    "Nice story!".to_string()
}

/// Strips a surrounding markdown code fence (with or without a language
/// tag) from the model output.
fn strip_code_fence(raw: &str) -> &str {
    let Some(rest) = raw.strip_prefix("```") else {
        return raw;
    };
    let body = rest.split_once('\n').map(|(_, b)| b).unwrap_or(rest);
    let body = body.rsplit_once("```").map(|(b, _)| b).unwrap_or(body);
    body.trim()
}
