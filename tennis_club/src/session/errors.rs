//! Session error types.

use thiserror::Error;

/// Errors raised while persisting or restoring a session
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the backing store failed
    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// A persisted value could not be encoded or decoded
    #[error("Session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Login time plus the session lifetime is not a representable instant
    #[error("Session lifetime {0} is out of range")]
    LifetimeOutOfRange(chrono::Duration),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
