//! Configuration management for the gateway

use crate::policy::{PolicyError, PolicyPreset, StatusOverride, StatusPolicy};
use crate::rest::{RestGatewayConfig, DEFAULT_MAX_BODY_BYTES};
use gridway_log::LogFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("toml parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("invalid listen address {0}")]
    ListenAddress(String),

    #[error("{field} must be an http(s) url, got {value:?}")]
    Url { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error(transparent)]
    Policy(#[from] PolicyError),
}

/// Logging section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `gridway_server=debug`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Plain,
        }
    }
}

/// Gateway configuration, stored as `config.toml` under the home directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Address the REST server binds to
    pub listen_address: String,
    /// Node REST endpoint answering distribution queries
    pub node_url: String,
    /// Signing service used for broadcast and gas simulation
    pub signer_url: String,
    /// Timeout for each outbound request in seconds
    pub request_timeout_secs: u64,
    pub max_body_bytes: usize,
    pub enable_cors: bool,
    /// Starting table for build-failure statuses
    pub status_policy: PolicyPreset,
    /// Individual entries replacing the preset's
    pub status_overrides: Vec<StatusOverride>,
    pub log: LogConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_address: "127.0.0.1:1317".to_string(),
            node_url: "http://localhost:1318".to_string(),
            signer_url: "http://localhost:1319".to_string(),
            request_timeout_secs: 30,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            enable_cors: true,
            status_policy: PolicyPreset::Legacy,
            status_overrides: Vec::new(),
            log: LogConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: GatewayConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get default home directory
    pub fn default_home_dir() -> PathBuf {
        if let Some(home) = dirs::home_dir() {
            home.join(".gridway-lcd")
        } else {
            PathBuf::from(".gridway-lcd")
        }
    }

    /// Configuration file path inside a home directory
    pub fn config_file(home: &Path) -> PathBuf {
        home.join("config").join("config.toml")
    }

    /// Write the default configuration unless one exists and `overwrite` is unset
    pub fn init(home: &Path, overwrite: bool) -> Result<Self, ConfigError> {
        let config_file = Self::config_file(home);
        if let Some(dir) = config_file.parent() {
            fs::create_dir_all(dir)?;
        }

        if config_file.exists() && !overwrite {
            return Self::load_from_file(config_file);
        }

        let config = Self::default();
        config.save_to_file(config_file)?;
        Ok(config)
    }

    /// Check values that deserialize fine but cannot be served
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;
        check_url("node_url", &self.node_url)?;
        check_url("signer_url", &self.signer_url)?;
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Zero("request_timeout_secs"));
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Zero("max_body_bytes"));
        }
        self.status_policy()?;
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.listen_address
            .parse()
            .map_err(|_| ConfigError::ListenAddress(self.listen_address.clone()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn status_policy(&self) -> Result<StatusPolicy, ConfigError> {
        Ok(StatusPolicy::from_config(
            self.status_policy,
            &self.status_overrides,
        )?)
    }

    pub fn rest_config(&self) -> RestGatewayConfig {
        RestGatewayConfig {
            max_body_bytes: self.max_body_bytes,
            enable_cors: self.enable_cors,
        }
    }
}

fn check_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::Url {
            field,
            value: value.to_string(),
        })
    }
}
