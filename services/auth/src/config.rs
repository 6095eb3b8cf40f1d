//! Client configuration
//!
//! Values come from `LEAVE_*` environment variables layered over defaults
//! that match the session constants in [`crate::policy`].

use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::policy::SessionPolicy;

/// Where the session is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    File,
    Memory,
    Redis,
}

/// Client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL, e.g. `http://localhost:8080/api`
    pub api_base_url: String,
    /// Inactivity timeout in seconds
    pub session_timeout_secs: u64,
    /// Request-level grace period in seconds
    pub grace_period_secs: u64,
    /// Background sweep interval in seconds
    pub sweep_interval_secs: u64,
    /// Background sweep grace period in seconds
    pub sweep_grace_secs: u64,
    /// Transport timeout for a single request in seconds
    pub request_timeout_secs: u64,
    /// Session storage backend
    pub storage: StorageKind,
    /// File used by the file storage backend
    pub storage_path: String,
}

impl ClientConfig {
    /// Create a new ClientConfig from environment variables
    ///
    /// # Environment Variables
    /// - `LEAVE_API_BASE_URL` (default: "http://localhost:8080/api")
    /// - `LEAVE_SESSION_TIMEOUT_SECS` (default: 1800)
    /// - `LEAVE_GRACE_PERIOD_SECS` (default: 10)
    /// - `LEAVE_SWEEP_INTERVAL_SECS` (default: 120)
    /// - `LEAVE_SWEEP_GRACE_SECS` (default: 5)
    /// - `LEAVE_REQUEST_TIMEOUT_SECS` (default: 30)
    /// - `LEAVE_STORAGE`: `file`, `memory` or `redis` (default: "file")
    /// - `LEAVE_STORAGE_PATH` (default: ".leave-session.json")
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("api_base_url", "http://localhost:8080/api")?
            .set_default("session_timeout_secs", 1800_i64)?
            .set_default("grace_period_secs", 10_i64)?
            .set_default("sweep_interval_secs", 120_i64)?
            .set_default("sweep_grace_secs", 5_i64)?
            .set_default("request_timeout_secs", 30_i64)?
            .set_default("storage", "file")?
            .set_default("storage_path", ".leave-session.json")?
            .add_source(Environment::with_prefix("LEAVE").try_parsing(true))
            .build()?;

        let config: ClientConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(ConfigError::Message(format!(
                "api_base_url must be an http(s) URL, got {}",
                self.api_base_url
            )));
        }
        if self.session_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "session_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.sweep_interval_secs == 0 {
            return Err(ConfigError::Message(
                "sweep_interval_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Policy applied by the guard and the gateway
    pub fn request_policy(&self) -> SessionPolicy {
        SessionPolicy::new(
            Duration::from_secs(self.session_timeout_secs),
            Duration::from_secs(self.grace_period_secs),
        )
    }

    /// Policy applied by the background sweep
    pub fn sweep_policy(&self) -> SessionPolicy {
        SessionPolicy::new(
            Duration::from_secs(self.session_timeout_secs),
            Duration::from_secs(self.sweep_grace_secs),
        )
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
