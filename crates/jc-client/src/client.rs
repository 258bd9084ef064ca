//! Console client bound to one endpoint configuration

use async_trait::async_trait;

use jc_core::{CommandRunner, ConfigError, EndpointConfig, EndpointOverrides, SessionError};

use crate::session::execute;

/// Runs console commands against a fixed endpoint.
///
/// Holds configuration only; every command gets its own connection.
#[derive(Debug, Clone)]
pub struct ConsoleClient {
    config: EndpointConfig,
}

impl ConsoleClient {
    /// Create a client, rejecting configurations that cannot connect
    pub fn new(config: EndpointConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The endpoint this client talks to
    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    /// Run a command with some endpoint settings replaced for this call only
    pub async fn run_command_with(
        &self,
        command: &str,
        overrides: &EndpointOverrides,
    ) -> Result<String, SessionError> {
        if overrides.is_empty() {
            return execute(command, &self.config).await;
        }
        execute(command, &overrides.apply(&self.config)).await
    }
}

#[async_trait]
impl CommandRunner for ConsoleClient {
    async fn run_command(&self, command: &str) -> Result<String, SessionError> {
        execute(command, &self.config).await
    }
}
