//! Console endpoint configuration

use std::fmt;
use std::time::Duration;

use jc_protocol::{Credentials, PromptMarkers};
use serde::{Deserialize, Serialize};

use super::serde_utils::duration_millis;
use crate::error::ConfigError;

/// Default console host
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default jcli port
pub const DEFAULT_PORT: u16 = 8990;
/// Default console login
pub const DEFAULT_USERNAME: &str = "jcliadmin";
/// Default console password
pub const DEFAULT_PASSWORD: &str = "jclipwd";
/// Default time allowed for a whole session
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_HOST: &str = "JASMIN_HOST";
pub const ENV_PORT: &str = "JASMIN_PORT";
pub const ENV_USERNAME: &str = "JASMIN_USERNAME";
pub const ENV_PASSWORD: &str = "JASMIN_PASSWORD";
pub const ENV_TIMEOUT_MS: &str = "JASMIN_TIMEOUT_MS";

const REDACTED: &str = "********";

/// Where and how to reach the console. Immutable for one session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Console host name or IP address
    pub host: String,

    /// Console TCP port
    pub port: u16,

    /// Login name sent at the username prompt
    pub username: String,

    /// Password sent at the password prompt
    pub password: String,

    /// Time allowed from connecting until the ready prompt follows the
    /// command
    #[serde(rename = "timeout_ms", with = "duration_millis")]
    pub timeout: Duration,

    /// Prompt strings of the console build being driven
    pub markers: PromptMarkers,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            timeout: DEFAULT_TIMEOUT,
            markers: PromptMarkers::default(),
        }
    }
}

impl fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("timeout", &self.timeout)
            .field("markers", &self.markers)
            .finish()
    }
}

impl EndpointConfig {
    /// Defaults overlaid with the `JASMIN_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env()
    }

    /// Overlay the `JASMIN_*` environment variables onto this config
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_env_from(|var| std::env::var(var).ok())
    }

    /// Overlay values from `lookup`, keyed by environment variable name.
    ///
    /// Empty values count as unset.
    pub fn with_env_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        if let Some(host) = get(ENV_HOST) {
            self.host = host.trim().to_string();
        }
        if let Some(port) = get(ENV_PORT) {
            self.port = port.trim().parse().map_err(|e| ConfigError::Env {
                var: ENV_PORT.to_string(),
                message: format!("{:?} is not a port number ({})", port, e),
            })?;
        }
        if let Some(username) = get(ENV_USERNAME) {
            self.username = username;
        }
        if let Some(password) = get(ENV_PASSWORD) {
            self.password = password;
        }
        if let Some(timeout) = get(ENV_TIMEOUT_MS) {
            let millis: u64 = timeout.trim().parse().map_err(|e| ConfigError::Env {
                var: ENV_TIMEOUT_MS.to_string(),
                message: format!("{:?} is not a number of milliseconds ({})", timeout, e),
            })?;
            self.timeout = Duration::from_millis(millis);
        }

        Ok(self)
    }

    /// `host:port` suitable for `TcpStream::connect`
    pub fn address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Login credentials for the handshake
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }

    /// Copy with the password masked, for display
    pub fn redacted(&self) -> Self {
        Self {
            password: REDACTED.to_string(),
            ..self.clone()
        }
    }

    /// Reject configurations that cannot drive a session
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must not be 0".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::Invalid("timeout must be greater than 0".to_string()));
        }
        if let Some(marker) = self.markers.first_empty() {
            return Err(ConfigError::Invalid(format!("marker {} must not be empty", marker)));
        }
        Ok(())
    }
}

/// Per-call overrides of the process-wide endpoint configuration
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EndpointOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout: Option<Duration>,
}

impl fmt::Debug for EndpointOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointOverrides")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl EndpointOverrides {
    /// Whether no field is overridden
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// `base` with every set field replaced
    pub fn apply(&self, base: &EndpointConfig) -> EndpointConfig {
        let mut config = base.clone();
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(username) = &self.username {
            config.username = username.clone();
        }
        if let Some(password) = &self.password {
            config.password = password.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EndpointConfig::default();
        assert_eq!(config.address(), "127.0.0.1:8990");
        assert_eq!(config.username, "jcliadmin");
        assert_eq!(config.password, "jclipwd");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = EndpointConfig::default()
            .with_env_from(lookup(&[
                (ENV_HOST, "jasmin.internal"),
                (ENV_PORT, "9000"),
                (ENV_USERNAME, "ops"),
                (ENV_PASSWORD, "s3cret"),
                (ENV_TIMEOUT_MS, "2500"),
            ]))
            .unwrap();

        assert_eq!(config.address(), "jasmin.internal:9000");
        assert_eq!(config.username, "ops");
        assert_eq!(config.password, "s3cret");
        assert_eq!(config.timeout, Duration::from_millis(2500));
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let config = EndpointConfig::default()
            .with_env_from(lookup(&[(ENV_HOST, ""), (ENV_PORT, "  ")]))
            .unwrap();
        assert_eq!(config.address(), "127.0.0.1:8990");
    }

    #[test]
    fn test_invalid_env_port() {
        let err = EndpointConfig::default()
            .with_env_from(lookup(&[(ENV_PORT, "telnet")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { ref var, .. } if var == ENV_PORT));
    }

    #[test]
    fn test_ipv6_address() {
        let config = EndpointConfig {
            host: "::1".to_string(),
            ..Default::default()
        };
        assert_eq!(config.address(), "[::1]:8990");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = EndpointConfig {
            port: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.port = DEFAULT_PORT;
        config.timeout = Duration::ZERO;
        assert!(config.validate().is_err());

        config.timeout = DEFAULT_TIMEOUT;
        config.markers.welcome_banner.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("welcome_banner"));
    }

    #[test]
    fn test_overrides_apply() {
        let base = EndpointConfig::default();
        let overrides = EndpointOverrides {
            port: Some(18990),
            timeout: Some(Duration::from_millis(300)),
            ..Default::default()
        };
        assert!(!overrides.is_empty());

        let config = overrides.apply(&base);
        assert_eq!(config.host, base.host);
        assert_eq!(config.port, 18990);
        assert_eq!(config.timeout, Duration::from_millis(300));
        assert!(EndpointOverrides::default().is_empty());
    }

    #[test]
    fn test_password_redacted() {
        let config = EndpointConfig::default();
        assert!(!format!("{:?}", config).contains("jclipwd"));
        assert_eq!(config.redacted().password, REDACTED);

        let overrides = EndpointOverrides {
            password: Some("hunter2".to_string()),
            ..Default::default()
        };
        assert!(!format!("{:?}", overrides).contains("hunter2"));
    }
}
