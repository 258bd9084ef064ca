//! Configuration management for jcli-bridge
//!
//! The effective endpoint configuration is resolved once at process start:
//! built-in defaults, then the config file, then `JASMIN_*` environment
//! variables. Callers layer per-call [`EndpointOverrides`] on top.

mod endpoint;
pub mod serde_utils;

pub use endpoint::{
    EndpointConfig, EndpointOverrides, DEFAULT_HOST, DEFAULT_PASSWORD, DEFAULT_PORT,
    DEFAULT_TIMEOUT, DEFAULT_USERNAME, ENV_HOST, ENV_PASSWORD, ENV_PORT, ENV_TIMEOUT_MS,
    ENV_USERNAME,
};

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root of the configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// `[console]` table
    pub console: EndpointConfig,
}

/// Get the default configuration directory
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("jcli-bridge")
}

/// Get the default configuration file path
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.toml")
}

/// Load configuration from a file
pub fn load_config<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Invalid(format!("Failed to read config: {}", e)))?;

    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to a file
pub fn save_config<T: serde::Serialize>(path: &Path, config: &T) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(config)?;

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| ConfigError::Invalid(format!("Failed to create config dir: {}", e)))?;
    }

    std::fs::write(path, content)
        .map_err(|e| ConfigError::Invalid(format!("Failed to write config: {}", e)))?;

    Ok(())
}

/// Resolve the endpoint configuration for this process.
///
/// An explicit `path` must exist; the default path is optional. The result
/// is validated.
pub fn resolve_config(path: Option<&Path>) -> Result<EndpointConfig, ConfigError> {
    let file: ConfigFile = match path {
        Some(path) => load_config(path)?,
        None => {
            let default_path = default_config_path();
            if default_path.exists() {
                tracing::debug!("Loading config from {:?}", default_path);
                load_config(&default_path)?
            } else {
                tracing::debug!("No config file, using defaults");
                ConfigFile::default()
            }
        }
    };

    let config = file.console.with_env()?;
    config.validate()?;
    Ok(config)
}
