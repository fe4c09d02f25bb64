//! Database configuration from the process environment.
//!
//! Values fall back to [`DbConfig::new`] defaults when a variable is unset.

use std::env;
use std::time::Duration;

use crate::pool::DbConfig;

/// Path to the SQLite database file.
pub const ENV_DATABASE_PATH: &str = "LIGHTBNB_DATABASE_PATH";
/// Maximum pool size.
pub const ENV_MAX_CONNECTIONS: &str = "LIGHTBNB_MAX_CONNECTIONS";
/// Seconds to wait for a pooled connection.
pub const ENV_CONNECT_TIMEOUT_SECS: &str = "LIGHTBNB_CONNECT_TIMEOUT_SECS";

/// Default database file when `LIGHTBNB_DATABASE_PATH` is unset.
pub const DEFAULT_DATABASE_PATH: &str = "./lightbnb.db";

impl DbConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Separated from [`from_env`](Self::from_env) so tests do not have to
    /// mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup(ENV_DATABASE_PATH).unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string());
        let mut config = DbConfig::new(path);

        if let Some(raw) = lookup(ENV_MAX_CONNECTIONS) {
            let max: u32 = raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue(ENV_MAX_CONNECTIONS.to_string()))?;
            if max == 0 {
                return Err(ConfigError::InvalidValue(ENV_MAX_CONNECTIONS.to_string()));
            }
            let min = config.min_connections.min(max);
            config = config.max_connections(max).min_connections(min);
        }

        if let Some(raw) = lookup(ENV_CONNECT_TIMEOUT_SECS) {
            let secs: u64 = raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue(ENV_CONNECT_TIMEOUT_SECS.to_string()))?;
            config = config.connect_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = DbConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.database_path, PathBuf::from(DEFAULT_DATABASE_PATH));
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn test_overrides() {
        let config = DbConfig::from_lookup(lookup(&[
            (ENV_DATABASE_PATH, "/tmp/lightbnb-test.db"),
            (ENV_MAX_CONNECTIONS, "12"),
            (ENV_CONNECT_TIMEOUT_SECS, "3"),
        ]))
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/lightbnb-test.db"));
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_values() {
        let err = DbConfig::from_lookup(lookup(&[(ENV_MAX_CONNECTIONS, "lots")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for LIGHTBNB_MAX_CONNECTIONS");

        assert!(DbConfig::from_lookup(lookup(&[(ENV_MAX_CONNECTIONS, "0")])).is_err());
        assert!(DbConfig::from_lookup(lookup(&[(ENV_CONNECT_TIMEOUT_SECS, "-1")])).is_err());
    }
}
