//! Service settings loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use common::DatabaseConfig;

use super::constants::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_DATABASE_URL, DEFAULT_FEED_LIMIT,
    DEFAULT_MAX_CONNECTIONS, DEFAULT_MAX_IDLE_SECS, DEFAULT_MIN_CONNECTIONS,
    DEFAULT_OPERATION_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT,
};

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server_host: String,
    pub server_port: u16,
    pub request_timeout_secs: u64,
    /// Deadline applied to each storage call made by a handler
    pub operation_timeout_secs: u64,
    pub feed_default_limit: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
                max_connections: parse_env("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS),
                min_connections: parse_env("DATABASE_MIN_CONNECTIONS", DEFAULT_MIN_CONNECTIONS),
                max_idle_secs: parse_env("DATABASE_MAX_IDLE_SECS", DEFAULT_MAX_IDLE_SECS),
                connect_timeout_secs: parse_env(
                    "DATABASE_CONNECT_TIMEOUT_SECS",
                    DEFAULT_CONNECT_TIMEOUT_SECS,
                ),
            },
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_env("SERVER_PORT", DEFAULT_SERVER_PORT),
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            operation_timeout_secs: parse_env(
                "DATABASE_OPERATION_TIMEOUT_SECS",
                DEFAULT_OPERATION_TIMEOUT_SECS,
            ),
            feed_default_limit: parse_env("FEED_DEFAULT_LIMIT", DEFAULT_FEED_LIMIT),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: DEFAULT_MAX_CONNECTIONS,
                min_connections: DEFAULT_MIN_CONNECTIONS,
                max_idle_secs: DEFAULT_MAX_IDLE_SECS,
                connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            },
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            operation_timeout_secs: DEFAULT_OPERATION_TIMEOUT_SECS,
            feed_default_limit: DEFAULT_FEED_LIMIT,
        }
    }
}

/// Read and parse an environment variable, falling back to `default`
fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.database.max_connections, 25);
        assert_eq!(config.database.min_connections, 5);
        assert_eq!(config.database.max_idle_secs, 900);
        assert_eq!(config.operation_timeout(), Duration::from_secs(10));
        assert_eq!(config.feed_default_limit, 20);
    }

    #[test]
    fn test_parse_env_falls_back_on_garbage() {
        std::env::set_var("SOCIAL_TEST_PORT", "not-a-number");
        assert_eq!(parse_env("SOCIAL_TEST_PORT", 42u16), 42);

        std::env::set_var("SOCIAL_TEST_PORT", "9090");
        assert_eq!(parse_env("SOCIAL_TEST_PORT", 42u16), 9090);
    }
}
