//! Session Store Port - Interface for per-conversation session records.
//!
//! This port defines how sessions are loaded and saved. No delete is
//! exposed; record lifetime is owned by the hosting framework's storage
//! lifecycle.

use async_trait::async_trait;

use crate::domain::{Session, SessionKey};

/// Errors that can occur during session store operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Failed to serialize session: {0}")]
    SerializationFailed(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Port for persisting and loading sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the session stored under a key, if any.
    ///
    /// # Errors
    /// Returns `SessionStoreError` if the backend fails; an absent record
    /// is `Ok(None)`, not an error.
    async fn get(&self, key: &SessionKey) -> Result<Option<Session>, SessionStoreError>;

    /// Store (insert or replace) a session under its own key.
    ///
    /// # Errors
    /// Returns `SessionStoreError` if the write fails
    async fn set(&self, session: &Session) -> Result<(), SessionStoreError>;
}
