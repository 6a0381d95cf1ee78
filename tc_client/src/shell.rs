//! Interactive shell command execution.
//!
//! Every protected command runs the session's route guard before touching
//! the backend, the same way a protected view checks on initialization.

use crate::{
    api_client::{ApiClient, ApiResult},
    commands::{SHELL_HELP, ShellCommand},
    navigation::TerminalNavigator,
    render,
};
use std::sync::Arc;
use tennis_club::{
    auth::Role,
    session::{SessionManager, View},
    tournament::{NewRegistration, TournamentId, bracket},
};

/// Result of one shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text to print; the shell keeps reading
    Text(String),
    /// Leave the shell
    Quit,
}

/// Printed when a guard refuses a command
pub const LOGIN_REQUIRED: &str = "You are not logged in. Run `tc_client login` first.\n";

pub struct Shell {
    api: ApiClient,
    navigator: Arc<TerminalNavigator>,
}

impl Shell {
    pub fn new(api: ApiClient, navigator: Arc<TerminalNavigator>) -> Self {
        Self { api, navigator }
    }

    pub fn session(&self) -> &SessionManager {
        self.api.session()
    }

    /// Run one command
    ///
    /// # Errors
    ///
    /// Backend failures are returned as-is; a 401/403 has already ended the
    /// session by the time the error is seen.
    pub async fn execute(&self, command: ShellCommand) -> ApiResult<Reply> {
        if command.requires_auth() {
            if !self.session().require_auth() {
                return Ok(Reply::Text(LOGIN_REQUIRED.to_string()));
            }
            self.navigator.enter(View::Protected);
        }

        let text = match command {
            ShellCommand::Help => SHELL_HELP.to_string(),
            ShellCommand::Quit => return Ok(Reply::Quit),
            ShellCommand::WhoAmI => match self.session().user() {
                Some(user) => format!("{}\n", render::user_badge(&user)),
                None => "Not logged in.\n".to_string(),
            },
            ShellCommand::Logout => {
                self.session().logout()?;
                return Ok(Reply::Quit);
            }
            ShellCommand::Tournaments => render::tournaments(&self.api.list_tournaments().await?),
            ShellCommand::Tournament(id) => render::tournament(&self.api.get_tournament(id).await?),
            ShellCommand::Registrations(id) => {
                render::registrations(&self.api.tournament_registrations(id).await?)
            }
            ShellCommand::Bracket(id) => self.bracket(id).await?,
            ShellCommand::Register(id) => {
                let registration = NewRegistration {
                    tournament_id: id,
                    athlete_id: None,
                };
                self.api.create_registration(&registration).await?;
                format!("Registered for tournament {}.\n", id)
            }
            ShellCommand::DeleteTournament(id) => {
                let is_admin = self
                    .session()
                    .user()
                    .is_some_and(|u| u.role == Role::Administrator);
                if !is_admin {
                    "Only administrators can delete tournaments.\n".to_string()
                } else {
                    self.api.delete_tournament(id).await?;
                    format!("Tournament {} deleted.\n", id)
                }
            }
            ShellCommand::Matches => render::matches(&self.api.list_matches().await?),
            ShellCommand::Stats => {
                let stats = self.api.dashboard_stats().await?;
                render::stats(&stats, self.session().user().as_ref())
            }
        };

        Ok(Reply::Text(text))
    }

    /// Recompute the bracket from the current registrations
    async fn bracket(&self, id: TournamentId) -> ApiResult<String> {
        let (tournament, registrations) = tokio::try_join!(
            self.api.get_tournament(id),
            self.api.tournament_registrations(id)
        )?;
        let draw = bracket::generate(&registrations);
        Ok(render::bracket(&tournament.name, &draw))
    }
}
