use std::fmt;
use tennis_club::tournament::TournamentId;

/// A command typed into the interactive shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Tournaments,
    Tournament(TournamentId),
    Bracket(TournamentId),
    Registrations(TournamentId),
    /// Register the logged-in athlete for a tournament
    Register(TournamentId),
    DeleteTournament(TournamentId),
    Matches,
    Stats,
    WhoAmI,
    Logout,
    Help,
    Quit,
}

impl ShellCommand {
    /// Whether the command needs an authenticated session
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Help | Self::Quit | Self::WhoAmI)
    }
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Command needs a tournament ID but none was given.
    MissingId(&'static str),
    /// Tournament ID is not a number.
    InvalidId(String),
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingId(cmd) => write!(
                f,
                "'{}' requires a tournament ID (e.g., '{} 3')",
                cmd, cmd
            ),
            Self::InvalidId(value) => write!(
                f,
                "Invalid tournament ID '{}'. Must be a number",
                value
            ),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Type 'help' to see available commands",
                cmd
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Shell help text
pub const SHELL_HELP: &str = "\
Commands:
  tournaments            List tournaments
  tournament ID          Show one tournament
  bracket ID             Show the bracket of a tournament
  registrations ID       List a tournament's registrations
  register ID            Register for a tournament
  delete ID              Delete a tournament (administrators)
  matches                List matches
  stats                  Dashboard counters
  whoami                 Show the logged-in user
  logout                 End the session
  help                   Show this help
  quit                   Leave the shell
";

/// Parse a command string into a ShellCommand.
///
/// # Arguments
///
/// * `input` - The raw command string from user input
///
/// # Returns
///
/// * `Ok(ShellCommand)` - Successfully parsed command
/// * `Err(ParseError)` - Parse error with descriptive message
///
/// # Examples
///
/// ```
/// use tc_client::commands::{ShellCommand, parse_command};
///
/// // Single-word commands
/// assert_eq!(parse_command("matches"), Ok(ShellCommand::Matches));
/// assert_eq!(parse_command("quit"), Ok(ShellCommand::Quit));
///
/// // Commands taking a tournament ID
/// assert_eq!(parse_command("bracket 7"), Ok(ShellCommand::Bracket(7)));
/// ```
pub fn parse_command(input: &str) -> Result<ShellCommand, ParseError> {
    let trimmed = input.trim();

    // Try single-word commands first
    match trimmed {
        "tournaments" | "ls" => return Ok(ShellCommand::Tournaments),
        "matches" => return Ok(ShellCommand::Matches),
        "stats" => return Ok(ShellCommand::Stats),
        "whoami" => return Ok(ShellCommand::WhoAmI),
        "logout" => return Ok(ShellCommand::Logout),
        "help" | "?" => return Ok(ShellCommand::Help),
        "quit" | "exit" => return Ok(ShellCommand::Quit),
        _ => {}
    }

    // Parse commands taking an ID
    let parts: Vec<&str> = trimmed.split_ascii_whitespace().collect();
    let (name, build): (&'static str, fn(TournamentId) -> ShellCommand) = match parts.first() {
        Some(&"tournament") => ("tournament", ShellCommand::Tournament),
        Some(&"bracket") => ("bracket", ShellCommand::Bracket),
        Some(&"registrations") => ("registrations", ShellCommand::Registrations),
        Some(&"register") => ("register", ShellCommand::Register),
        Some(&"delete") => ("delete", ShellCommand::DeleteTournament),
        _ => return Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    };

    parse_id(name, parts.get(1).copied()).map(build)
}

/// Parse the ID argument of "CMD ID"; IDs are positive
fn parse_id(command: &'static str, value: Option<&str>) -> Result<TournamentId, ParseError> {
    match value {
        Some(value) => value
            .parse::<TournamentId>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| ParseError::InvalidId(value.to_string())),
        None => Err(ParseError::MissingId(command)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Single-word command tests ===

    #[test]
    fn test_parse_tournaments() {
        assert_eq!(parse_command("tournaments"), Ok(ShellCommand::Tournaments));
        assert_eq!(parse_command("ls"), Ok(ShellCommand::Tournaments));
    }

    #[test]
    fn test_parse_matches() {
        assert_eq!(parse_command("matches"), Ok(ShellCommand::Matches));
    }

    #[test]
    fn test_parse_stats() {
        assert_eq!(parse_command("stats"), Ok(ShellCommand::Stats));
    }

    #[test]
    fn test_parse_session_commands() {
        assert_eq!(parse_command("whoami"), Ok(ShellCommand::WhoAmI));
        assert_eq!(parse_command("logout"), Ok(ShellCommand::Logout));
    }

    #[test]
    fn test_parse_help_and_quit() {
        assert_eq!(parse_command("help"), Ok(ShellCommand::Help));
        assert_eq!(parse_command("?"), Ok(ShellCommand::Help));
        assert_eq!(parse_command("quit"), Ok(ShellCommand::Quit));
        assert_eq!(parse_command("exit"), Ok(ShellCommand::Quit));
    }

    #[test]
    fn test_parse_with_whitespace() {
        assert_eq!(parse_command("  stats  "), Ok(ShellCommand::Stats));
        assert_eq!(parse_command("bracket    12"), Ok(ShellCommand::Bracket(12)));
    }

    // === ID command tests ===

    #[test]
    fn test_parse_id_commands() {
        assert_eq!(parse_command("tournament 3"), Ok(ShellCommand::Tournament(3)));
        assert_eq!(parse_command("bracket 3"), Ok(ShellCommand::Bracket(3)));
        assert_eq!(
            parse_command("registrations 3"),
            Ok(ShellCommand::Registrations(3))
        );
        assert_eq!(parse_command("register 3"), Ok(ShellCommand::Register(3)));
        assert_eq!(
            parse_command("delete 3"),
            Ok(ShellCommand::DeleteTournament(3))
        );
    }

    #[test]
    fn test_parse_missing_id() {
        assert_eq!(
            parse_command("bracket"),
            Err(ParseError::MissingId("bracket"))
        );
        assert_eq!(
            parse_command("delete"),
            Err(ParseError::MissingId("delete"))
        );
    }

    #[test]
    fn test_parse_invalid_id() {
        assert_eq!(
            parse_command("tournament abc"),
            Err(ParseError::InvalidId("abc".to_string()))
        );
        assert_eq!(
            parse_command("bracket -1"),
            Err(ParseError::InvalidId("-1".to_string()))
        );
        assert_eq!(
            parse_command("register 0"),
            Err(ParseError::InvalidId("0".to_string()))
        );
    }

    // === Error cases ===

    #[test]
    fn test_parse_unrecognized_command() {
        assert_eq!(
            parse_command("serve"),
            Err(ParseError::UnrecognizedCommand("serve".to_string()))
        );
    }

    #[test]
    fn test_parse_empty_command() {
        assert_eq!(
            parse_command(""),
            Err(ParseError::UnrecognizedCommand(String::new()))
        );
    }

    #[test]
    fn test_parse_case_sensitive() {
        assert!(parse_command("STATS").is_err());
    }

    // === ParseError Display tests ===

    #[test]
    fn test_error_display_missing_id() {
        let msg = ParseError::MissingId("bracket").to_string();
        assert!(msg.contains("bracket 3"));
    }

    #[test]
    fn test_error_display_invalid_id() {
        let msg = ParseError::InvalidId("abc".to_string()).to_string();
        assert!(msg.contains("abc"));
        assert!(msg.contains("number"));
    }

    #[test]
    fn test_error_display_unrecognized() {
        let msg = ParseError::UnrecognizedCommand("foo".to_string()).to_string();
        assert!(msg.contains("foo"));
        assert!(msg.contains("help"));
    }

    #[test]
    fn test_requires_auth() {
        assert!(ShellCommand::Tournaments.requires_auth());
        assert!(ShellCommand::Bracket(1).requires_auth());
        assert!(!ShellCommand::Help.requires_auth());
        assert!(!ShellCommand::Quit.requires_auth());
    }
}
