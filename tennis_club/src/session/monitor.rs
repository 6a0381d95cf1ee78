//! Background session checks.
//!
//! Every validation interval the monitor runs the local expiry check and then
//! asks the backend about the token. Ticks are skipped while the client is
//! hidden; becoming visible again triggers one check right away. The session
//! manager already refuses to run two validations at once, so a tick and a
//! visibility change landing together cost a single request.

use super::{
    manager::{SessionManager, SessionState},
    validator::TokenValidator,
};
use std::sync::Arc;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Whether the client is currently shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Handle to a running monitor task
pub struct SessionMonitor {
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl SessionMonitor {
    /// Spawn the monitor on the current tokio runtime
    ///
    /// The first periodic check happens one interval after spawning. The
    /// task ends on [`SessionMonitor::stop`] or when the visibility sender is
    /// dropped. Stopping does not wait for a check that is still waiting on
    /// the backend.
    pub fn spawn(
        session: SessionManager,
        validator: Arc<dyn TokenValidator>,
        visibility: watch::Receiver<Visibility>,
    ) -> Self {
        let (shutdown, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(run(session, validator, visibility, shutdown_rx));
        Self {
            shutdown: Some(shutdown),
            handle,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop the task and wait for it to finish
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Err(e) = (&mut self.handle).await {
            log::warn!("Session monitor task failed: {}", e);
        }
    }
}

impl Drop for SessionMonitor {
    fn drop(&mut self) {
        if self.shutdown.is_some() {
            self.handle.abort();
        }
    }
}

async fn run(
    session: SessionManager,
    validator: Arc<dyn TokenValidator>,
    mut visibility: watch::Receiver<Visibility>,
    mut shutdown: oneshot::Receiver<()>,
) {
    let period = session.policy().validation_interval;
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    log::debug!("Session monitor started, interval {:?}", period);

    loop {
        let due = tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                let hidden = *visibility.borrow() == Visibility::Hidden;
                if hidden {
                    log::trace!("Client hidden, skipping session check");
                }
                !hidden
            }
            changed = visibility.changed() => {
                if changed.is_err() {
                    break;
                }
                *visibility.borrow_and_update() == Visibility::Visible
            }
        };
        if !due {
            continue;
        }

        // A check abandoned here releases the single-flight guard on drop
        tokio::select! {
            _ = &mut shutdown => break,
            _ = check(&session, validator.as_ref()) => {}
        }
    }

    log::debug!("Session monitor stopped");
}

async fn check(session: &SessionManager, validator: &dyn TokenValidator) {
    if session.check_expiry() != SessionState::Authenticated {
        return;
    }
    session.validate_with(validator).await;
}
