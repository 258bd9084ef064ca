//! jc-core: Core abstractions and configuration for jcli-bridge
//!
//! This crate provides the endpoint configuration, error types and the
//! [`CommandRunner`] trait shared by the console client and the CLI.

pub mod config;
pub mod error;
pub mod traits;

pub use config::{EndpointConfig, EndpointOverrides};
pub use error::{ConfigError, ErrorKind, SessionError};
pub use traits::CommandRunner;
