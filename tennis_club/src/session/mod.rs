//! Client session management.
//!
//! The [`SessionManager`] owns the bearer token, the logged-in user and the
//! local expiry, persists them through a [`SessionStore`] and enforces the
//! route guards through a [`Navigator`]. Time comes from a [`Clock`] and
//! server-side checks go through a [`TokenValidator`], so every side of the
//! state machine can be swapped in tests.
//!
//! States:
//!
//! - **Anonymous**: no session
//! - **Authenticated**: token present and not past its expiry
//! - **Expired**: token present but past its expiry; purged on the next check
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use tennis_club::auth::{Role, UserSummary};
//! use tennis_club::session::{
//!     MemoryNavigator, MemoryStore, Navigator, SessionManager, SessionPolicy, SystemClock, View,
//! };
//!
//! let navigator = Arc::new(MemoryNavigator::new(View::Login));
//! let session = SessionManager::load(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(SystemClock),
//!     navigator.clone(),
//!     SessionPolicy::default(),
//! )?;
//!
//! let user = UserSummary {
//!     id: Some(1),
//!     name: "Ana".to_string(),
//!     surname: "Lopez".to_string(),
//!     email: "ana@example.com".to_string(),
//!     username: None,
//!     phone: None,
//!     role: Role::Athlete,
//!     active: true,
//! };
//!
//! session.set_auth("token".to_string(), user)?;
//! assert!(session.is_authenticated());
//! assert_eq!(navigator.current_view(), View::Protected);
//! # Ok::<(), tennis_club::session::SessionError>(())
//! ```

pub mod clock;
pub mod errors;
pub mod manager;
pub mod monitor;
pub mod navigator;
pub mod policy;
pub mod store;
pub mod validator;

pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::{SessionError, SessionResult};
pub use manager::{SessionManager, SessionState};
pub use monitor::{SessionMonitor, Visibility};
pub use navigator::{MemoryNavigator, Navigator, View};
pub use policy::SessionPolicy;
pub use store::{FileStore, MemoryStore, SessionStore};
pub use validator::{TokenStatus, TokenValidator};
