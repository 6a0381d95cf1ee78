//! Authentication models shared by the session manager and the HTTP client.
//!
//! ## Example
//!
//! ```
//! use tennis_club::auth::{RegisterRequest, Role};
//!
//! let request = RegisterRequest::new(
//!     "Ana".to_string(),
//!     "Lopez".to_string(),
//!     "ana@example.com".to_string(),
//!     "ana".to_string(),
//!     "secret123".to_string(),
//! );
//!
//! assert_eq!(request.role, Role::Athlete);
//! assert!(request.validate("secret123").is_ok());
//! ```

pub mod errors;
pub mod models;

pub use errors::{AuthError, AuthResult};
pub use models::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, Role, TokenVerification,
    UserId, UserSummary,
};
