//! Configuration for the interaction layer

use crate::{Error, Result};
use serde::Deserialize;
use std::env;

/// Interaction-layer configuration
///
/// Base URL and credentials are treated as opaque strings; they come from the
/// environment or a TOML file and are never interpreted here.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the application under test
    pub base_url: String,

    /// Login email for positive-path flows
    pub login_email: String,

    /// Login password for positive-path flows
    pub login_password: String,

    /// Per-strategy resolution timeout in milliseconds
    pub strategy_timeout: u64,

    /// Poll interval for resolver retries and readiness waits, milliseconds
    pub poll_interval: u64,

    /// Navigation/redirect timeout in milliseconds
    pub navigation_timeout: u64,

    /// Timeout for the remote auto-fill operation in milliseconds
    pub auto_fill_timeout: u64,

    /// Path to the credential fixture file, if any
    pub users_fixture_path: Option<String>,

    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            login_email: String::new(),
            login_password: String::new(),
            strategy_timeout: 5000,
            poll_interval: 100,
            navigation_timeout: 15000,
            auto_fill_timeout: 60000,
            users_fixture_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(base_url) = env::var("E2E_BASE_URL") {
            config.base_url = base_url;
        }

        if let Ok(email) = env::var("E2E_LOGIN_EMAIL") {
            config.login_email = email;
        }

        if let Ok(password) = env::var("E2E_LOGIN_PASSWORD") {
            config.login_password = password;
        }

        if let Ok(timeout) = env::var("E2E_STRATEGY_TIMEOUT") {
            config.strategy_timeout = timeout
                .parse()
                .map_err(|_| Error::configuration("Invalid E2E_STRATEGY_TIMEOUT"))?;
        }

        if let Ok(interval) = env::var("E2E_POLL_INTERVAL") {
            config.poll_interval = interval
                .parse()
                .map_err(|_| Error::configuration("Invalid E2E_POLL_INTERVAL"))?;
        }

        if let Ok(timeout) = env::var("E2E_NAVIGATION_TIMEOUT") {
            config.navigation_timeout = timeout
                .parse()
                .map_err(|_| Error::configuration("Invalid E2E_NAVIGATION_TIMEOUT"))?;
        }

        if let Ok(timeout) = env::var("E2E_AUTO_FILL_TIMEOUT") {
            config.auto_fill_timeout = timeout
                .parse()
                .map_err(|_| Error::configuration("Invalid E2E_AUTO_FILL_TIMEOUT"))?;
        }

        if let Ok(path) = env::var("E2E_USERS_FIXTURE") {
            config.users_fixture_path = Some(path);
        }

        if let Ok(log_level) = env::var("E2E_LOG_LEVEL") {
            config.log_level = log_level;
        }

        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::configuration(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::configuration(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }
}
