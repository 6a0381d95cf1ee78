//! Server-side token validation seam.

use async_trait::async_trait;

/// Outcome of asking the backend about a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    /// Backend accepted the token
    Valid,
    /// Backend answered 401 or 403
    Rejected,
    /// No usable answer: transport failure or an unrelated error status
    Unavailable,
}

/// Checks a bearer token against the backend
#[async_trait]
pub trait TokenValidator: Send + Sync {
    async fn verify_token(&self, token: &str) -> TokenStatus;
}
