use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Minimum spacing between token-driven snapshots.
    pub throttle_ms: u64,
    /// Largest event log accepted by the replay endpoint.
    pub replay_max_events: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            throttle_ms: parse_env("STREAM_THROTTLE_MS", 50)?,
            replay_max_events: parse_env("REPLAY_MAX_EVENTS", 10_000)?,
        })
    }

    pub fn throttle_interval(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            throttle_ms: 50,
            replay_max_events: 10_000,
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u64 = parse_env("PROFILE_STREAM_TEST_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_reads_and_rejects() {
        std::env::set_var("PROFILE_STREAM_TEST_THROTTLE", " 75 ");
        let value: u64 = parse_env("PROFILE_STREAM_TEST_THROTTLE", 50).unwrap();
        assert_eq!(value, 75);

        std::env::set_var("PROFILE_STREAM_TEST_THROTTLE", "fast");
        let err = parse_env::<u64>("PROFILE_STREAM_TEST_THROTTLE", 50).unwrap_err();
        assert!(err.to_string().contains("PROFILE_STREAM_TEST_THROTTLE"));
        std::env::remove_var("PROFILE_STREAM_TEST_THROTTLE");
    }

    #[test]
    fn test_default_throttle_is_50ms() {
        assert_eq!(
            Config::default().throttle_interval(),
            Duration::from_millis(50)
        );
    }
}
