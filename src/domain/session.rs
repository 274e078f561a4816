//! Chat session aggregate.
//!
//! One session is one continuous exchange between a visitor and the agent,
//! identified by the key the hosting framework assigns to the conversation.
//!
//! # Invariants
//!
//! - A session moves `New -> AwaitingInput -> Completed` and never back.
//! - The completed phase carries the issued coupon inline, so a completed
//!   session without a coupon is unrepresentable.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::coupon::CouponCode;
use super::errors::DomainError;
use super::state_machine::StateMachine;

/// Opaque key identifying one conversation session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(String);

impl SessionKey {
    /// Creates a session key from the hosting framework's conversation id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SessionPhase {
    /// No welcome sent yet.
    New,
    /// Welcome sent; waiting for the visitor's story or preference.
    AwaitingInput,
    /// Coupon issued; terminal.
    Completed { coupon: CouponCode },
}

impl SessionPhase {
    /// Data-free view of this phase, used for transition validation.
    pub fn kind(&self) -> PhaseKind {
        match self {
            SessionPhase::New => PhaseKind::New,
            SessionPhase::AwaitingInput => PhaseKind::AwaitingInput,
            SessionPhase::Completed { .. } => PhaseKind::Completed,
        }
    }
}

/// Discriminant of [`SessionPhase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    New,
    AwaitingInput,
    Completed,
}

impl StateMachine for PhaseKind {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PhaseKind::*;
        matches!(
            (self, target),
            (New, AwaitingInput) | (AwaitingInput, Completed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PhaseKind::*;
        match self {
            New => vec![AwaitingInput],
            AwaitingInput => vec![Completed],
            Completed => vec![],
        }
    }
}

/// Session aggregate - the per-conversation record the agent keeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    key: SessionKey,
    phase: SessionPhase,
}

impl Session {
    /// Creates a new session in the initial phase.
    pub fn new(key: SessionKey) -> Self {
        Self {
            key,
            phase: SessionPhase::New,
        }
    }

    /// Returns the session key.
    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    /// Returns the current phase.
    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    /// Marks the welcome prompt as sent; the session now waits for input.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if the session is already past `New`
    pub fn begin_awaiting_input(&mut self) -> Result<(), DomainError> {
        self.phase.kind().transition_to(PhaseKind::AwaitingInput)?;
        self.phase = SessionPhase::AwaitingInput;
        Ok(())
    }

    /// Completes the session with an issued coupon. Terminal.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if no input was awaited, or already completed
    pub fn complete(&mut self, coupon: CouponCode) -> Result<(), DomainError> {
        self.phase.kind().transition_to(PhaseKind::Completed)?;
        self.phase = SessionPhase::Completed { coupon };
        Ok(())
    }

    /// Returns the issued coupon, if the session is completed.
    pub fn coupon(&self) -> Option<&CouponCode> {
        match &self.phase {
            SessionPhase::Completed { coupon } => Some(coupon),
            _ => None,
        }
    }

    /// Checks whether the session has reached its terminal phase.
    pub fn is_completed(&self) -> bool {
        self.phase.kind().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn test_coupon() -> CouponCode {
        CouponCode::derive(
            "DONUT",
            "FETCH25",
            "agent1qxyz",
            Utc.with_ymd_and_hms(2025, 10, 14, 9, 41, 0).unwrap(),
        )
    }

    #[test]
    fn new_session_starts_in_new_phase() {
        let session = Session::new(SessionKey::new("session-1"));
        assert_eq!(session.phase(), &SessionPhase::New);
        assert!(!session.is_completed());
        assert!(session.coupon().is_none());
    }

    #[test]
    fn full_lifecycle_reaches_completed() {
        let mut session = Session::new(SessionKey::new("session-1"));

        session.begin_awaiting_input().unwrap();
        assert_eq!(session.phase(), &SessionPhase::AwaitingInput);

        session.complete(test_coupon()).unwrap();
        assert!(session.is_completed());
        assert_eq!(session.coupon(), Some(&test_coupon()));
    }

    #[test]
    fn cannot_complete_before_awaiting_input() {
        let mut session = Session::new(SessionKey::new("session-1"));
        assert!(session.complete(test_coupon()).is_err());
    }

    #[test]
    fn cannot_reenter_awaiting_input() {
        let mut session = Session::new(SessionKey::new("session-1"));
        session.begin_awaiting_input().unwrap();
        assert!(session.begin_awaiting_input().is_err());
    }

    #[test]
    fn completed_is_terminal() {
        let mut session = Session::new(SessionKey::new("session-1"));
        session.begin_awaiting_input().unwrap();
        session.complete(test_coupon()).unwrap();

        // No further transition is accepted and the coupon is unchanged
        let original = session.coupon().cloned().unwrap();
        assert!(session.begin_awaiting_input().is_err());
        assert!(session.complete(test_coupon()).is_err());
        assert_eq!(session.coupon(), Some(&original));
    }

    #[test]
    fn phase_kind_transition_table() {
        assert_eq!(
            PhaseKind::New.valid_transitions(),
            vec![PhaseKind::AwaitingInput]
        );
        assert_eq!(
            PhaseKind::AwaitingInput.valid_transitions(),
            vec![PhaseKind::Completed]
        );
        assert!(PhaseKind::Completed.valid_transitions().is_empty());
        assert!(PhaseKind::Completed.is_terminal());
    }

    #[test]
    fn session_round_trips_through_serde() {
        let mut session = Session::new(SessionKey::new("session-1"));
        session.begin_awaiting_input().unwrap();
        session.complete(test_coupon()).unwrap();

        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }
}
