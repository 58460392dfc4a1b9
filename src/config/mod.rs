//! config
//!
//! Client configuration: which environment to talk to, where the token file
//! lives, and how long a request may take.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values (`prod`, 30 second timeout)
//! 2. Config file
//! 3. `NEXAA_ENV` environment variable (environment only)
//!
//! # Config File Location
//!
//! Searched in order:
//! 1. `$NEXAA_CONFIG` if set
//! 2. `~/.nexaa/config.toml`
//!
//! # Example
//!
//! ```toml
//! environment = "dev"
//! timeout_secs = 10
//! ```
//!
//! ```no_run
//! use nexaa::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("Endpoint: {}", config.endpoint());
//! ```

mod environment;

pub use environment::{Environment, EnvironmentSettings};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "NEXAA_CONFIG";

/// Environment variable selecting the environment.
pub const ENVIRONMENT_ENV_VAR: &str = "NEXAA_ENV";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {message}")]
    WriteError { path: PathBuf, message: String },

    #[error("unknown environment '{0}' (valid: prod, dev)")]
    UnknownEnvironment(String),

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Client configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Target environment
    #[serde(default)]
    pub environment: Environment,
    /// Explicit GraphQL endpoint, overriding the environment's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Explicit token file location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_file: Option<PathBuf>,
    /// Request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from the default locations and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed, or if
    /// `NEXAA_ENV` names an unknown environment. A missing config file is not
    /// an error.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::find_config_file() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env_override(std::env::var(ENVIRONMENT_ENV_VAR).ok().as_deref())?;
        Ok(config)
    }

    /// Read and validate a config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), environment = %config.environment, "loaded config");
        Ok(config)
    }

    /// Write this configuration as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_error = |message: String| ConfigError::WriteError {
            path: path.to_path_buf(),
            message,
        };

        self.validate()?;
        let contents = toml::to_string_pretty(self).map_err(|e| write_error(e.to_string()))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
        }
        fs::write(path, contents).map_err(|e| write_error(e.to_string()))
    }

    /// Apply an environment override such as the value of `NEXAA_ENV`.
    ///
    /// `None` and empty values leave the configuration unchanged.
    pub fn apply_env_override(&mut self, value: Option<&str>) -> Result<(), ConfigError> {
        match value.map(str::trim) {
            Some(name) if !name.is_empty() => {
                self.environment = name.parse()?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Check values that deserialize fine but make no sense.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(endpoint) = &self.endpoint {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(ConfigError::InvalidValue(format!(
                    "endpoint must be an http(s) URL, got '{}'",
                    endpoint
                )));
            }
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// The GraphQL endpoint to call.
    pub fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or(self.environment.settings().graphql_url)
    }

    /// The request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// The token file location: configured, or `~/.nexaa/auth.json`.
    pub fn token_file(&self) -> Result<PathBuf, ConfigError> {
        match &self.token_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("auth.json")),
        }
    }

    /// Canonical config file path: `~/.nexaa/config.toml`.
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    fn config_dir() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".nexaa"))
    }

    fn find_config_file() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        Self::default_config_path().ok().filter(|path| path.exists())
    }
}
