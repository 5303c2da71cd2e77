//! services/chat_client/src/config.rs
//!
//! Defines the client's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub backend_url: String,
    pub broker_url: String,
    /// Tenant sent as `Fiware-Service` on broker queries.
    pub fiware_service: String,
    /// Sent as `Fiware-ServicePath`; always starts with `/`.
    pub fiware_service_path: String,
    pub log_level: Level,
    /// How long a status line stays visible.
    pub status_clear_after: Duration,
    /// `None` leaves the transport's own defaults in place.
    pub request_timeout: Option<Duration>,
    pub check_on_start: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Remote Endpoints ---
        let backend_url = lookup("CHAT_BACKEND_URL")
            .unwrap_or_else(|| "http://127.0.0.1:5000".to_string());
        let backend_url = normalize_url("CHAT_BACKEND_URL", &backend_url)?;

        let broker_url =
            lookup("BROKER_URL").unwrap_or_else(|| "http://localhost:1026".to_string());
        let broker_url = normalize_url("BROKER_URL", &broker_url)?;

        let fiware_service =
            lookup("FIWARE_SERVICE").unwrap_or_else(|| "smart_data_service".to_string());
        let fiware_service_path =
            lookup("FIWARE_SERVICE_PATH").unwrap_or_else(|| "/data".to_string());
        if !fiware_service_path.starts_with('/') {
            return Err(ConfigError::InvalidValue(
                "FIWARE_SERVICE_PATH".to_string(),
                format!("'{}' must start with /", fiware_service_path),
            ));
        }

        // --- Logging ---
        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Timing ---
        let status_clear_ms = match lookup("STATUS_CLEAR_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue("STATUS_CLEAR_MS".to_string(), e.to_string())
            })?,
            None => 5000,
        };

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) if !raw.trim().is_empty() => {
                let secs = raw.trim().parse::<u64>().map_err(|e| {
                    ConfigError::InvalidValue("REQUEST_TIMEOUT_SECS".to_string(), e.to_string())
                })?;
                Some(Duration::from_secs(secs))
            }
            _ => None,
        };

        let check_on_start = match lookup("CHECK_ON_START") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                ConfigError::InvalidValue(
                    "CHECK_ON_START".to_string(),
                    format!("'{}' is not a boolean", raw),
                )
            })?,
            None => false,
        };

        Ok(Self {
            backend_url,
            broker_url,
            fiware_service,
            fiware_service_path,
            log_level,
            status_clear_after: Duration::from_millis(status_clear_ms),
            request_timeout,
            check_on_start,
        })
    }
}

fn normalize_url(var: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidValue(
            var.to_string(),
            format!("'{}' must start with http:// or https://", raw),
        ));
    }
    Ok(trimmed.to_string())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
