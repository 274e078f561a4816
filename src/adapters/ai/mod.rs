//! AI provider adapters.

mod asi_one_provider;
mod mock_provider;

pub use asi_one_provider::{AsiOneConfig, AsiOneProvider};
pub use mock_provider::{MockAIProvider, MockError};
