//! Structured logging setup for the client.
//!
//! Library crates log through the `log` facade; the subscriber installed here
//! picks those records up alongside the client's own `tracing` events.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or unparsable
pub const DEFAULT_FILTER: &str = "info,reqwest=warn,hyper=warn";

/// Initialize logging to stderr
///
/// Levels are taken from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
/// Calling this twice is a no-op.
///
/// # Example
///
/// ```no_run
/// use tc_client::logging;
///
/// logging::init();
/// tracing::info!("Client starting");
/// ```
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
    {
        tracing::debug!("Logging initialized");
    }
}

/// Log a completed backend call
///
/// # Arguments
///
/// * `method` - HTTP method
/// * `path` - Request path, without the base URL
/// * `status_code` - Response status, `None` when the request never got one
/// * `duration_ms` - Time until the response headers arrived
pub fn log_api_request(method: &str, path: &str, status_code: Option<u16>, duration_ms: u64) {
    match status_code {
        Some(status) if status < 400 => tracing::debug!(
            http_method = method,
            http_path = path,
            http_status = status,
            duration_ms = duration_ms,
            "API request completed"
        ),
        Some(status) => tracing::warn!(
            http_method = method,
            http_path = path,
            http_status = status,
            duration_ms = duration_ms,
            "API request failed"
        ),
        None => tracing::warn!(
            http_method = method,
            http_path = path,
            duration_ms = duration_ms,
            "API request got no response"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_api_request() {
        log_api_request("GET", "/api/torneos", Some(200), 45);
        log_api_request("POST", "/api/auth/login", Some(401), 120);
        log_api_request("GET", "/api/partidos", None, 3);
    }

    #[test]
    fn test_init_twice() {
        init();
        init();
    }
}
