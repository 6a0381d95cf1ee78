//! Session lifetime and validation cadence.

use chrono::Duration;

/// Default time a login stays valid locally
pub const DEFAULT_SESSION_LIFETIME_HOURS: i64 = 8;

/// Default period between background checks
pub const DEFAULT_VALIDATION_INTERVAL_SECS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Added to the login time to get the local expiry
    pub lifetime: Duration,
    /// Period of the background expiry and token checks
    pub validation_interval: std::time::Duration,
}

impl SessionPolicy {
    pub fn new(lifetime: Duration, validation_interval: std::time::Duration) -> Self {
        Self {
            lifetime,
            validation_interval,
        }
    }
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            lifetime: Duration::hours(DEFAULT_SESSION_LIFETIME_HOURS),
            validation_interval: std::time::Duration::from_secs(DEFAULT_VALIDATION_INTERVAL_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = SessionPolicy::default();
        assert_eq!(policy.lifetime, Duration::hours(8));
        assert_eq!(policy.validation_interval.as_secs(), 300);
    }
}
