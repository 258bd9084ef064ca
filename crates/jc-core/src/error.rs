//! Core error types for jcli-bridge

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use jc_protocol::{ProtocolError, SessionState};
use serde::Serialize;
use thiserror::Error;

/// Why a console session failed
#[derive(Error, Debug)]
pub enum SessionError {
    /// Could not establish, or lost, the transport connection
    #[error("Connection error: {0}")]
    Connection(String),

    /// No ready prompt within the configured timeout
    #[error("Timed out after {0:?} waiting for the console prompt")]
    Timeout(Duration),

    /// The console closed the stream before the command completed
    #[error("Connection closed before command completion (state: {state})")]
    PrematureClose { state: SessionState },

    /// The console rejected the credentials
    #[error("Authentication failed: console rejected the credentials")]
    AuthenticationFailure,

    /// The command cannot be sent
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

impl SessionError {
    /// Coarse classification reported to callers
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::Connection(_) => ErrorKind::ConnectionError,
            SessionError::Timeout(_) => ErrorKind::Timeout,
            SessionError::PrematureClose { .. } => ErrorKind::PrematureClose,
            SessionError::AuthenticationFailure => ErrorKind::AuthenticationFailure,
            SessionError::InvalidCommand(_) => ErrorKind::InvalidCommand,
        }
    }
}

impl From<ProtocolError> for SessionError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::Io(e) => SessionError::Connection(e.to_string()),
            ProtocolError::SessionFinished(state) => SessionError::PrematureClose { state },
        }
    }
}

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        SessionError::Connection(err.to_string())
    }
}

/// Error classification exposed at the component boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    ConnectionError,
    Timeout,
    PrematureClose,
    AuthenticationFailure,
    InvalidCommand,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::ConnectionError => "ConnectionError",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::PrematureClose => "PrematureClose",
            ErrorKind::AuthenticationFailure => "AuthenticationFailure",
            ErrorKind::InvalidCommand => "InvalidCommand",
        };
        f.write_str(name)
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// Invalid configuration
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// Environment variable holds an unusable value
    #[error("Invalid value for {var}: {message}")]
    Env { var: String, message: String },

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialize error
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
