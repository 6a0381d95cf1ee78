//! Navigation capability used by the route guards.
//!
//! Implementations decide how a view change is shown. The internal route of
//! the protected view must never be exposed or be reachable by going back
//! once the user has left it.

use std::sync::Mutex;

/// Views the session manager knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Public entry view
    Public,
    /// Login form
    Login,
    /// Anything that requires an authenticated session
    Protected,
}

impl View {
    /// Public and login views never trigger an expiry redirect
    pub fn is_public(&self) -> bool {
        matches!(self, View::Public | View::Login)
    }
}

pub trait Navigator: Send + Sync {
    fn current_view(&self) -> View;

    fn redirect_to_protected(&self);

    fn redirect_to_public(&self);

    /// Platforms without a separate login view land on the public view
    fn redirect_to_login(&self) {
        self.redirect_to_public();
    }
}

/// Headless navigator that tracks the current view and every redirect
///
/// The history only ever holds the latest redirect target per step; nothing
/// is pushed that could be navigated back to.
#[derive(Debug)]
pub struct MemoryNavigator {
    state: Mutex<(View, Vec<View>)>,
}

impl MemoryNavigator {
    pub fn new(initial: View) -> Self {
        Self {
            state: Mutex::new((initial, Vec::new())),
        }
    }

    /// Redirect targets in order
    pub fn redirects(&self) -> Vec<View> {
        self.lock().1.clone()
    }

    pub fn last_redirect(&self) -> Option<View> {
        self.lock().1.last().copied()
    }

    /// Move without a redirect, as if the user opened a view directly
    pub fn visit(&self, view: View) {
        self.lock().0 = view;
    }

    fn go(&self, view: View) {
        let mut state = self.lock();
        state.0 = view;
        state.1.push(view);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, (View, Vec<View>)> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl Navigator for MemoryNavigator {
    fn current_view(&self) -> View {
        self.lock().0
    }

    fn redirect_to_protected(&self) {
        self.go(View::Protected);
    }

    fn redirect_to_public(&self) {
        self.go(View::Public);
    }

    fn redirect_to_login(&self) {
        self.go(View::Login);
    }
}
