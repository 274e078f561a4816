//! Conference event and engagement configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::EngagementMode;

/// Conference event and coupon settings.
///
/// These are static values read once at startup; they shape the welcome
/// prompt, the coupon code format, and the redemption instructions.
#[derive(Debug, Clone, Deserialize)]
pub struct EventConfig {
    /// Agent display name
    #[serde(default = "default_agent_name")]
    pub agent_name: String,

    /// Short conference identifier embedded in coupon codes
    #[serde(default = "default_conference_id")]
    pub conference_id: String,

    /// Full conference name used in messages
    #[serde(default = "default_conference_name")]
    pub conference_name: String,

    /// First day of the conference (display only)
    #[serde(default = "default_start_date")]
    pub conference_start_date: String,

    /// Last day of the conference (display only)
    #[serde(default = "default_end_date")]
    pub conference_end_date: String,

    /// Prefix for issued coupon codes
    #[serde(default = "default_coupon_prefix")]
    pub coupon_prefix: String,

    /// Minimum accepted story length in characters (story mode only)
    #[serde(default = "default_min_story_length")]
    pub min_story_length: usize,

    /// Which engagement flow to run: story contest or preference poll
    #[serde(default)]
    pub mode: EngagementMode,
}

impl EventConfig {
    /// Validate event configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_code_segment(&self.conference_id) {
            return Err(ValidationError::InvalidConferenceId);
        }
        if !is_code_segment(&self.coupon_prefix) {
            return Err(ValidationError::InvalidCouponPrefix);
        }
        if self.min_story_length == 0 || self.min_story_length > 1000 {
            return Err(ValidationError::InvalidMinStoryLength);
        }
        Ok(())
    }
}

/// Coupon code segments must be non-empty uppercase alphanumeric so the
/// final code stays unambiguous when read aloud at a vendor stand.
fn is_code_segment(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            agent_name: default_agent_name(),
            conference_id: default_conference_id(),
            conference_name: default_conference_name(),
            conference_start_date: default_start_date(),
            conference_end_date: default_end_date(),
            coupon_prefix: default_coupon_prefix(),
            min_story_length: default_min_story_length(),
            mode: EngagementMode::default(),
        }
    }
}

fn default_agent_name() -> String {
    "fetch-a-donut".to_string()
}

fn default_conference_id() -> String {
    "FETCH25".to_string()
}

fn default_conference_name() -> String {
    "Fetch Summit 2025".to_string()
}

fn default_start_date() -> String {
    "Oct 14".to_string()
}

fn default_end_date() -> String {
    "Oct 16".to_string()
}

fn default_coupon_prefix() -> String {
    "DONUT".to_string()
}

fn default_min_story_length() -> usize {
    20
}
