//! Configuration management and environment variable loading

use crate::{FridayError, Result};
use std::env;
use std::path::Path;
use std::time::Duration;

/// Default timeout for persona and upstream HTTP calls
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Extra time a dashboard client waits on the proxy beyond the upstream timeout
pub const PROXY_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

/// Timeout for dashboard-to-proxy calls given the proxy's upstream timeout.
///
/// The proxy must be able to report its own upstream timeout before the
/// client gives up on it.
pub fn proxy_client_timeout(upstream_timeout: Duration) -> Duration {
    upstream_timeout + PROXY_TIMEOUT_MARGIN
}

/// Load environment variables from .env file
///
/// Looks in the current directory and its parents. A missing file is not an
/// error; the process environment is used as-is.
///
/// # Example
///
/// ```no_run
/// use friday_core::load_env;
///
/// load_env().ok();
/// let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
/// ```
pub fn load_env() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::info!("✓ Loaded environment from: {}", path.display());
            Ok(())
        }
        Err(dotenvy::Error::LineParse(line, pos)) => Err(FridayError::config(format!(
            "Failed to parse .env file at line {}, position {}",
            line, pos
        ))),
        Err(dotenvy::Error::Io(_)) => {
            tracing::warn!("No .env file found - using system environment variables only");
            Ok(())
        }
        Err(e) => Err(FridayError::config(format!(
            "Failed to load .env file: {}",
            e
        ))),
    }
}

/// Load environment variables from a specific file
pub fn load_env_from_path<P: AsRef<Path>>(path: P) -> Result<()> {
    match dotenvy::from_path(path.as_ref()) {
        Ok(_) => {
            tracing::info!("✓ Loaded environment from: {}", path.as_ref().display());
            Ok(())
        }
        Err(e) => Err(FridayError::config(format!(
            "Failed to load {} environment file: {}",
            path.as_ref().display(),
            e
        ))),
    }
}

/// Get required environment variable
///
/// Returns an error if the variable is not set
pub fn get_required_env(key: &str) -> Result<String> {
    env::var(key).map_err(|_| {
        FridayError::config(format!(
            "Required environment variable '{}' is not set. \
             Check your .env file or system environment.",
            key
        ))
    })
}

/// Get optional environment variable with default
pub fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get environment variable as boolean
pub fn get_env_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .and_then(|v| match v.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

/// Get environment variable as integer
pub fn get_env_int<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Get a timeout in whole seconds, falling back to [`DEFAULT_REQUEST_TIMEOUT`]
pub fn get_env_timeout(key: &str) -> Duration {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_bool() {
        env::set_var("FRIDAY_TEST_BOOL_TRUE", "true");
        env::set_var("FRIDAY_TEST_BOOL_0", "0");

        assert!(get_env_bool("FRIDAY_TEST_BOOL_TRUE", false));
        assert!(!get_env_bool("FRIDAY_TEST_BOOL_0", true));
        assert!(get_env_bool("FRIDAY_TEST_NONEXISTENT", true));

        env::remove_var("FRIDAY_TEST_BOOL_TRUE");
        env::remove_var("FRIDAY_TEST_BOOL_0");
    }

    #[test]
    fn test_get_env_int() {
        env::set_var("FRIDAY_TEST_PORT", "4100");
        assert_eq!(get_env_int::<u16>("FRIDAY_TEST_PORT", 0), 4100);
        assert_eq!(get_env_int::<u16>("FRIDAY_TEST_NONEXISTENT_PORT", 99), 99);
        env::remove_var("FRIDAY_TEST_PORT");
    }

    #[test]
    fn test_get_env_timeout() {
        env::set_var("FRIDAY_TEST_TIMEOUT", "5");
        env::set_var("FRIDAY_TEST_TIMEOUT_ZERO", "0");
        assert_eq!(get_env_timeout("FRIDAY_TEST_TIMEOUT"), Duration::from_secs(5));
        assert_eq!(
            get_env_timeout("FRIDAY_TEST_TIMEOUT_ZERO"),
            DEFAULT_REQUEST_TIMEOUT
        );
        env::remove_var("FRIDAY_TEST_TIMEOUT");
        env::remove_var("FRIDAY_TEST_TIMEOUT_ZERO");
    }

    #[test]
    fn test_proxy_client_outlasts_upstream() {
        assert_eq!(
            proxy_client_timeout(DEFAULT_REQUEST_TIMEOUT),
            Duration::from_secs(35)
        );
        assert!(proxy_client_timeout(Duration::from_secs(1)) > Duration::from_secs(1));
    }

    #[test]
    fn test_get_required_env_missing() {
        let err = get_required_env("FRIDAY_TEST_DEFINITELY_UNSET").unwrap_err();
        assert!(err.to_string().contains("FRIDAY_TEST_DEFINITELY_UNSET"));
    }
}
