//! Protocol error types

use thiserror::Error;

use crate::state::SessionState;

/// Errors that can occur while driving the console protocol
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Data was fed to a session that already reached a terminal state
    #[error("Session already finished in state {0}")]
    SessionFinished(SessionState),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
