//! Coupon code derivation.
//!
//! A coupon is a short human-presentable redemption code, derived
//! deterministically from the sender's address and the issue time:
//! `PREFIX-CONFERENCEID-HASH6-HHMM`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Number of hex characters taken from the sender hash.
const HASH_SEGMENT_LEN: usize = 6;

/// A redeemable coupon code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CouponCode(String);

impl CouponCode {
    /// Derives the coupon for a sender at the given instant.
    ///
    /// The hash segment is the first 6 uppercase hex characters of
    /// SHA-256 over the sender identifier, so the same sender receives
    /// the same code for the whole of one UTC minute.
    pub fn derive(
        prefix: &str,
        conference_id: &str,
        sender: &str,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let digest = Sha256::digest(sender.as_bytes());
        let mut hash_segment = String::with_capacity(HASH_SEGMENT_LEN);
        for byte in digest.iter().take(HASH_SEGMENT_LEN / 2) {
            hash_segment.push_str(&format!("{:02X}", byte));
        }

        let stamp = issued_at.format("%H%M");
        Self(format!(
            "{}-{}-{}-{}",
            prefix, conference_id, hash_segment, stamp
        ))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
