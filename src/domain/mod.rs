//! Domain layer - session lifecycle, coupon derivation, evaluation values.

pub mod coupon;
pub mod errors;
pub mod evaluation;
pub mod session;
pub mod state_machine;

pub use coupon::CouponCode;
pub use errors::DomainError;
pub use evaluation::{EngagementMode, StoryEvaluation, MAX_SCORE, MIN_SCORE};
pub use session::{PhaseKind, Session, SessionKey, SessionPhase};
pub use state_machine::StateMachine;
