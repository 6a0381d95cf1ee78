//! Authentication error types.

use thiserror::Error;

/// Authentication errors raised on the client side
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login response did not carry a token and a user
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Required registration field left blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Password and confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
