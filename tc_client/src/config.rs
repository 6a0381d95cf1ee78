//! Client configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::path::PathBuf;
use std::time::Duration;
use tennis_club::session::{
    SessionPolicy,
    policy::{DEFAULT_SESSION_LIFETIME_HOURS, DEFAULT_VALIDATION_INTERVAL_SECS},
};

/// Backend used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Where the session is persisted between runs
pub const DEFAULT_SESSION_FILE: &str = ".tennis_session.json";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Longest accepted session lifetime (30 days)
pub const MAX_SESSION_LIFETIME_MINS: i64 = 30 * 24 * 60;

/// Complete client configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash
    pub api_url: String,
    /// Session file path
    pub session_file: PathBuf,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Session lifetime and validation cadence
    pub policy: SessionPolicy,
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `api_url_override` - Optional backend URL override (from CLI args)
    /// * `session_file_override` - Optional session file override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be parsed
    pub fn from_env(
        api_url_override: Option<String>,
        session_file_override: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let api_url = api_url_override
            .or_else(|| std::env::var("TENNIS_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let session_file = session_file_override
            .or_else(|| std::env::var("TENNIS_SESSION_FILE").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));

        let timeout_secs: u64 =
            parse_env_or("TENNIS_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        let lifetime_mins: i64 = parse_env_or(
            "TENNIS_SESSION_LIFETIME_MINS",
            DEFAULT_SESSION_LIFETIME_HOURS * 60,
        )?;
        let interval_secs: u64 = parse_env_or(
            "TENNIS_VALIDATION_INTERVAL_SECS",
            DEFAULT_VALIDATION_INTERVAL_SECS,
        )?;

        Ok(ClientConfig {
            api_url,
            session_file,
            request_timeout: Duration::from_secs(timeout_secs),
            policy: SessionPolicy::new(
                session_lifetime(lifetime_mins)?,
                Duration::from_secs(interval_secs),
            ),
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: "TENNIS_API_URL".to_string(),
                reason: format!("Must start with http:// or https:// (got {})", self.api_url),
            });
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                var: "TENNIS_REQUEST_TIMEOUT_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.policy.lifetime <= chrono::Duration::zero() {
            return Err(ConfigError::Invalid {
                var: "TENNIS_SESSION_LIFETIME_MINS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.policy.lifetime > chrono::Duration::minutes(MAX_SESSION_LIFETIME_MINS) {
            return Err(ConfigError::Invalid {
                var: "TENNIS_SESSION_LIFETIME_MINS".to_string(),
                reason: format!("Must be at most {MAX_SESSION_LIFETIME_MINS}"),
            });
        }

        if self.policy.validation_interval.is_zero() {
            return Err(ConfigError::Invalid {
                var: "TENNIS_VALIDATION_INTERVAL_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Convert a lifetime in minutes, rejecting values chrono cannot represent
fn session_lifetime(minutes: i64) -> Result<chrono::Duration, ConfigError> {
    chrono::Duration::try_minutes(minutes).ok_or_else(|| ConfigError::Invalid {
        var: "TENNIS_SESSION_LIFETIME_MINS".to_string(),
        reason: format!("{minutes} minutes is out of range"),
    })
}

/// Parse an environment variable, using `default` when it is unset
fn parse_env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            var: key.to_string(),
            reason: format!("Cannot parse {raw:?}"),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> ClientConfig {
        ClientConfig {
            api_url: DEFAULT_API_URL.to_string(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            policy: SessionPolicy::default(),
        }
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Invalid {
            var: "TENNIS_API_URL".to_string(),
            reason: "Must start with http://".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("TENNIS_API_URL"));
        assert!(msg.contains("http://"));
    }

    #[test]
    fn test_overrides_win() {
        let config = ClientConfig::from_env(
            Some("https://club.example.com/".to_string()),
            Some(PathBuf::from("/tmp/session.json")),
        )
        .unwrap();

        assert_eq!(config.api_url, "https://club.example.com");
        assert_eq!(config.session_file, PathBuf::from("/tmp/session.json"));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(sample_config().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_scheme() {
        let mut config = sample_config();
        config.api_url = "localhost:5000".to_string();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "TENNIS_API_URL"));
    }

    #[test]
    fn test_validation_rejects_zero_lifetime() {
        let mut config = sample_config();
        config.policy.lifetime = chrono::Duration::zero();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_lifetime_out_of_range_is_an_error() {
        let err = session_lifetime(i64::MAX).unwrap_err();
        assert!(
            matches!(err, ConfigError::Invalid { ref var, .. } if var == "TENNIS_SESSION_LIFETIME_MINS")
        );
        assert_eq!(session_lifetime(480).unwrap(), chrono::Duration::hours(8));
    }

    #[test]
    fn test_validation_rejects_oversized_lifetime() {
        let mut config = sample_config();
        config.policy.lifetime = chrono::Duration::minutes(MAX_SESSION_LIFETIME_MINS);
        assert!(config.validate().is_ok());

        config.policy.lifetime = chrono::Duration::minutes(1_000_000_000_000);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_interval() {
        let mut config = sample_config();
        config.policy.validation_interval = Duration::ZERO;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = sample_config();
        config.request_timeout = Duration::ZERO;

        assert!(config.validate().is_err());
    }
}
