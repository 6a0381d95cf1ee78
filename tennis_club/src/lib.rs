//! # Tennis Club
//!
//! Client-side core of a tennis tournament manager.
//!
//! The library holds the two pieces of logic that the client needs beyond
//! plain JSON-over-HTTP calls:
//!
//! - A session manager that owns the bearer token, its local expiry and the
//!   route guards, with a background monitor that re-validates the token.
//! - A bracket generator that lays out a single-elimination draw from a
//!   tournament's registrations.
//!
//! ## Core Modules
//!
//! - [`auth`]: Login, registration and user profile models
//! - [`session`]: Session state machine, storage, navigation and monitoring
//! - [`tournament`]: Tournament, registration and match models, brackets
//!
//! ## Example
//!
//! ```
//! use tennis_club::tournament::bracket;
//!
//! // An empty tournament has an empty bracket
//! let draw = bracket::generate(&[]);
//! assert_eq!(draw.round_count(), 0);
//! ```

/// Authentication models.
pub mod auth;

/// Session state machine and its capabilities.
pub mod session;

/// Tournament data and bracket layout.
pub mod tournament;

pub use auth::{Role, UserSummary};
pub use session::{SessionManager, SessionState};
pub use tournament::bracket::{Bracket, generate as generate_bracket};
