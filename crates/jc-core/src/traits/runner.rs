//! Command runner trait

use async_trait::async_trait;

use crate::error::SessionError;

/// Runs one console command and returns its cleaned output.
///
/// This is the only operation callers see. Implementations open a fresh
/// console session per call and never retry.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Execute `command` and return the console's response text
    async fn run_command(&self, command: &str) -> Result<String, SessionError>;
}
