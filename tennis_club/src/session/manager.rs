//! Session manager: authentication state, persistence and route guards.

use super::{
    clock::Clock,
    errors::{SessionError, SessionResult},
    navigator::Navigator,
    policy::SessionPolicy,
    store::{EXPIRY_KEY, SESSION_KEYS, SessionStore, TOKEN_KEY, USER_KEY},
    validator::{TokenStatus, TokenValidator},
};
use crate::auth::UserSummary;
use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Authentication state of the current client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
    /// Token still held but past its expiry; grants no access
    Expired,
}

/// Token, user and expiry exist together or not at all
#[derive(Debug, Clone)]
struct Credentials {
    token: String,
    user: UserSummary,
    expires_at: DateTime<Utc>,
}

/// Session manager
///
/// Cheap to clone; clones share the same session. Construct one per client
/// with [`SessionManager::load`] and hand it to every view.
#[derive(Clone)]
pub struct SessionManager {
    credentials: Arc<Mutex<Option<Credentials>>>,
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    navigator: Arc<dyn Navigator>,
    policy: SessionPolicy,
    validating: Arc<AtomicBool>,
}

/// Clears the in-flight flag when a validation finishes or is dropped
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SessionManager {
    /// Restore the session persisted in `store`
    ///
    /// A record with a missing entry or an unparsable user or expiry is
    /// purged and the session starts anonymous. An expired record is kept
    /// until the first state check so it can be purged as an expiry.
    ///
    /// # Errors
    ///
    /// * `SessionError::Storage` - the store could not be read
    pub fn load(
        store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
        navigator: Arc<dyn Navigator>,
        policy: SessionPolicy,
    ) -> SessionResult<Self> {
        let token = store.get(TOKEN_KEY)?;
        let user = store.get(USER_KEY)?;
        let expiry = store.get(EXPIRY_KEY)?;

        let credentials = match (token, user, expiry) {
            (None, None, None) => None,
            (Some(token), Some(user), Some(expiry)) => {
                match Self::decode(token, &user, &expiry) {
                    Some(credentials) => Some(credentials),
                    None => {
                        log::warn!("Discarding unreadable persisted session");
                        store.remove_all(&SESSION_KEYS)?;
                        None
                    }
                }
            }
            _ => {
                log::warn!("Discarding incomplete persisted session");
                store.remove_all(&SESSION_KEYS)?;
                None
            }
        };

        if let Some(c) = &credentials {
            log::debug!("Restored session for {} (expires {})", c.user.email, c.expires_at);
        }

        Ok(Self {
            credentials: Arc::new(Mutex::new(credentials)),
            store,
            clock,
            navigator,
            policy,
            validating: Arc::new(AtomicBool::new(false)),
        })
    }

    fn decode(token: String, user: &str, expiry: &str) -> Option<Credentials> {
        let user: UserSummary = serde_json::from_str(user).ok()?;
        let expires_at = DateTime::parse_from_rfc3339(expiry)
            .ok()?
            .with_timezone(&Utc);
        if token.is_empty() {
            return None;
        }
        Some(Credentials {
            token,
            user,
            expires_at,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Option<Credentials>> {
        self.credentials
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn state_of(&self, credentials: &Option<Credentials>) -> SessionState {
        match credentials {
            None => SessionState::Anonymous,
            Some(c) if self.clock.now() > c.expires_at => SessionState::Expired,
            Some(_) => SessionState::Authenticated,
        }
    }

    fn purge(&self, credentials: &mut Option<Credentials>) {
        *credentials = None;
        if let Err(e) = self.store.remove_all(&SESSION_KEYS) {
            log::warn!("Failed to purge persisted session: {}", e);
        }
    }

    /// Purge an expired session; returns the state seen before purging
    fn settle(&self) -> SessionState {
        let mut credentials = self.lock();
        let state = self.state_of(&credentials);
        if state == SessionState::Expired {
            if let Some(c) = credentials.as_ref() {
                log::info!("Session for {} expired at {}", c.user.email, c.expires_at);
            }
            self.purge(&mut credentials);
        }
        state
    }

    fn leave_protected_view(&self) {
        if !self.navigator.current_view().is_public() {
            self.navigator.redirect_to_public();
        }
    }

    /// Current state, without side effects
    pub fn state(&self) -> SessionState {
        self.state_of(&self.lock())
    }

    /// Whether the session grants access
    ///
    /// Detecting expiry here purges the session and leaves the protected
    /// view, unless the user is already on the public or login view.
    pub fn is_authenticated(&self) -> bool {
        self.check_expiry() == SessionState::Authenticated
    }

    /// Local expiry check used by the background monitor
    ///
    /// Returns the state observed before any purge.
    pub fn check_expiry(&self) -> SessionState {
        let state = self.settle();
        if state == SessionState::Expired {
            self.leave_protected_view();
        }
        state
    }

    /// Bearer token while the session is authenticated
    pub fn token(&self) -> Option<String> {
        let credentials = self.lock();
        match self.state_of(&credentials) {
            SessionState::Authenticated => credentials.as_ref().map(|c| c.token.clone()),
            _ => None,
        }
    }

    /// Logged-in user while the session is authenticated
    pub fn user(&self) -> Option<UserSummary> {
        let credentials = self.lock();
        match self.state_of(&credentials) {
            SessionState::Authenticated => credentials.as_ref().map(|c| c.user.clone()),
            _ => None,
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.lock().as_ref().map(|c| c.expires_at)
    }

    pub fn policy(&self) -> &SessionPolicy {
        &self.policy
    }

    /// Record a successful login and move to the protected view
    ///
    /// Replaces any previous session. Expiry is now plus the policy lifetime.
    ///
    /// # Errors
    ///
    /// * `SessionError::Storage` / `SessionError::Serialization` - the session
    ///   could not be persisted; the in-memory state is left unchanged
    /// * `SessionError::LifetimeOutOfRange` - the expiry overflows the calendar
    pub fn set_auth(&self, token: String, user: UserSummary) -> SessionResult<()> {
        let expires_at = self
            .clock
            .now()
            .checked_add_signed(self.policy.lifetime)
            .ok_or(SessionError::LifetimeOutOfRange(self.policy.lifetime))?;
        let user_json = serde_json::to_string(&user)?;
        let expiry = expires_at.to_rfc3339_opts(SecondsFormat::Millis, true);

        {
            let mut credentials = self.lock();
            self.store.set_all(&[
                (TOKEN_KEY, token.as_str()),
                (USER_KEY, user_json.as_str()),
                (EXPIRY_KEY, expiry.as_str()),
            ])?;
            log::info!("Logged in as {} ({})", user.email, user.role);
            *credentials = Some(Credentials {
                token,
                user,
                expires_at,
            });
        }

        self.navigator.redirect_to_protected();
        Ok(())
    }

    /// Drop the session and move to the public view
    ///
    /// # Errors
    ///
    /// * `SessionError::Storage` - the persisted entries could not be removed;
    ///   the in-memory session is cleared regardless
    pub fn logout(&self) -> SessionResult<()> {
        let result = {
            let mut credentials = self.lock();
            if let Some(c) = credentials.take() {
                log::info!("Logged out {}", c.user.email);
            }
            self.store.remove_all(&SESSION_KEYS)
        };

        self.navigator.redirect_to_public();
        result
    }

    /// Guard for protected views
    ///
    /// Returns `false` and redirects to the login view when the session does
    /// not grant access; the caller must stop initializing the view.
    pub fn require_auth(&self) -> bool {
        if self.settle() == SessionState::Authenticated {
            return true;
        }
        self.navigator.redirect_to_login();
        false
    }

    /// Guard for the public and login views
    ///
    /// Returns `true` after redirecting to the protected view when the user
    /// is already logged in.
    pub fn redirect_if_authenticated(&self) -> bool {
        if self.settle() == SessionState::Authenticated {
            self.navigator.redirect_to_protected();
            return true;
        }
        false
    }

    /// Ask the backend whether the current token is still accepted
    ///
    /// Returns `None` when there is no authenticated session or another
    /// validation is already running. A rejection clears the session only if
    /// it still holds the token that was checked; an unavailable backend
    /// leaves the session untouched. A late acceptance never restores a
    /// session cleared in the meantime.
    pub async fn validate_with(&self, validator: &dyn TokenValidator) -> Option<TokenStatus> {
        if self.validating.swap(true, Ordering::AcqRel) {
            log::debug!("Token validation already in flight");
            return None;
        }
        let _in_flight = InFlight(&self.validating);

        let token = self.token()?;
        let status = validator.verify_token(&token).await;

        match status {
            TokenStatus::Valid => log::debug!("Token still valid"),
            TokenStatus::Unavailable => {
                log::warn!("Token validation unavailable, keeping session")
            }
            TokenStatus::Rejected => {
                self.reject_token(&token);
            }
        }

        Some(status)
    }

    /// Drop the session after the backend refused `token`
    ///
    /// Does nothing when the session no longer holds `token`, so a late
    /// answer about an old login cannot end a newer one. Returns whether the
    /// session was cleared.
    pub fn reject_token(&self, token: &str) -> bool {
        let cleared = {
            let mut credentials = self.lock();
            let current = credentials.as_ref().is_some_and(|c| c.token == token);
            if current {
                log::warn!("Backend rejected session token, logging out");
                self.purge(&mut credentials);
            } else {
                log::debug!("Ignoring rejection of a token no longer in use");
            }
            current
        };
        if cleared {
            self.leave_protected_view();
        }
        cleared
    }
}
