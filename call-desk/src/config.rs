//! Call Desk configuration
//!
//! Read from the environment, after an optional `.env` file in the working
//! directory has been loaded. Command-line flags override what is read here.

use std::path::PathBuf;

use call_client::{ClientConfig, ClientError};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_LEVEL_ENV: &str = "CALL_DESK_LOG_LEVEL";

/// Environment variable holding the rolling log directory
pub const LOG_DIR_ENV: &str = "CALL_DESK_LOG_DIR";

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid backend URL {0:?}: expected http:// or https://")]
    InvalidApiBase(String),

    #[error("invalid log filter {value:?}: {reason}")]
    InvalidLogLevel { value: String, reason: String },

    #[error(transparent)]
    Client(#[from] ClientError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub client: ClientConfig,
    /// `EnvFilter` directive, e.g. `info` or `call_client=debug,info`
    pub log_level: String,
    /// Daily rolling log files are written here when set
    pub log_dir: Option<PathBuf>,
    /// `.env` file that was loaded, reported once logging is up
    pub env_file: Option<PathBuf>,
}

impl Config {
    /// Load `.env` (if present) and read the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let env_file = dotenvy::dotenv().ok();
        Ok(Self {
            env_file,
            ..Self::from_env()?
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = lookup(LOG_LEVEL_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let log_dir = lookup(LOG_DIR_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let config = Self {
            client: ClientConfig::from_lookup(&lookup)?,
            log_level,
            log_dir,
            env_file: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Replace the backend base URL
    pub fn with_api_base(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        self.client = self.client.with_base_url(base_url);
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.client.base_url;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidApiBase(base.clone()));
        }
        EnvFilter::try_new(&self.log_level).map_err(|e| ConfigError::InvalidLogLevel {
            value: self.log_level.clone(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}
