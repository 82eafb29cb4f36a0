//! Session Store Port - Interface for keeping conversation sessions.
//!
//! The controller loads a session, applies one reply and saves it back.
//! The host delivers at most one update per session at a time, so the
//! store only needs per-key isolation.

use async_trait::async_trait;

use crate::domain::foundation::SessionId;
use crate::domain::intake::Session;

/// Errors that can occur during session storage operations
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
    /// Loads the session, or `None` if it was never started.
    async fn load(&self, id: &SessionId) -> Result<Option<Session>, SessionStoreError>;

    /// Inserts or replaces the session under its own id.
    async fn save(&self, session: &Session) -> Result<(), SessionStoreError>;
}
