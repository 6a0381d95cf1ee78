//! Terminal navigation for the route guards.

use std::sync::Mutex;
use tennis_club::session::{Navigator, View};

/// Tracks which screen the shell is on and tells the user when a guard moves
/// them
///
/// Only view names are ever printed.
#[derive(Debug)]
pub struct TerminalNavigator {
    view: Mutex<View>,
    announce: bool,
}

impl TerminalNavigator {
    pub fn new(initial: View) -> Self {
        Self {
            view: Mutex::new(initial),
            announce: true,
        }
    }

    /// Navigator that changes views without printing anything
    pub fn silent(initial: View) -> Self {
        Self {
            view: Mutex::new(initial),
            announce: false,
        }
    }

    /// Enter a view on the user's request, without a redirect notice
    pub fn enter(&self, view: View) {
        *self.lock() = view;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, View> {
        self.view.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn go(&self, view: View, notice: &str) {
        let previous = std::mem::replace(&mut *self.lock(), view);
        tracing::debug!(from = ?previous, to = ?view, "Redirect");
        if self.announce && previous != view {
            println!("{notice}");
        }
    }
}

impl Navigator for TerminalNavigator {
    fn current_view(&self) -> View {
        *self.lock()
    }

    fn redirect_to_protected(&self) {
        self.go(View::Protected, "-> Dashboard");
    }

    fn redirect_to_public(&self) {
        self.go(View::Public, "-> Home (signed out)");
    }

    fn redirect_to_login(&self) {
        self.go(View::Login, "-> Login required");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirects_change_view() {
        let nav = TerminalNavigator::silent(View::Public);
        nav.redirect_to_protected();
        assert_eq!(nav.current_view(), View::Protected);

        nav.redirect_to_login();
        assert_eq!(nav.current_view(), View::Login);

        nav.redirect_to_public();
        assert_eq!(nav.current_view(), View::Public);
    }

    #[test]
    fn test_enter_sets_view() {
        let nav = TerminalNavigator::silent(View::Public);
        nav.enter(View::Protected);
        assert_eq!(nav.current_view(), View::Protected);
    }
}
