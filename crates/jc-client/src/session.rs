//! A single console session
//!
//! Connect, answer the login prompts, write the command, and read until the
//! console shows its ready prompt again. The socket lives inside the session
//! future, so every way out of it (result, error, timeout, or the caller
//! dropping the future) closes the connection.

use futures::{SinkExt, StreamExt};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_util::codec::Framed;

use jc_core::{EndpointConfig, SessionError};
use jc_protocol::{ConsoleCodec, ConsoleProtocol, Event, LineKind};

/// Run `command` on the console described by `config`.
///
/// The timeout covers the whole session, connect included. No retry is
/// attempted on failure. An unusable `config` fails as a connection error
/// before any socket is opened.
pub async fn execute(command: &str, config: &EndpointConfig) -> Result<String, SessionError> {
    if command.trim().is_empty() {
        return Err(SessionError::InvalidCommand(
            "command must not be empty".to_string(),
        ));
    }
    config
        .validate()
        .map_err(|e| SessionError::Connection(e.to_string()))?;

    match tokio::time::timeout(config.timeout, run_session(command, config)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                "No ready prompt from {} within {:?}, closing connection",
                config.address(),
                config.timeout
            );
            Err(SessionError::Timeout(config.timeout))
        }
    }
}

async fn run_session(command: &str, config: &EndpointConfig) -> Result<String, SessionError> {
    let address = config.address();
    let mut protocol = ConsoleProtocol::new(config.markers.clone(), config.credentials(), command);

    tracing::debug!("Connecting to console at {}", address);
    let stream = TcpStream::connect(&address).await.map_err(|e| {
        SessionError::Connection(format!("Failed to connect to console at {}: {}", address, e))
    })?;
    protocol.connected();
    tracing::info!("Connected to console at {}", address);

    let mut framed = Framed::new(stream, ConsoleCodec::new());

    while let Some(chunk) = framed.next().await {
        let text = match chunk {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Console connection error in state {}: {}", protocol.state(), e);
                protocol.fail();
                return Err(e.into());
            }
        };
        tracing::trace!(bytes = text.len(), "Received console data");

        for event in protocol.feed(&text)? {
            match event {
                Event::Send(line) => {
                    match line.kind {
                        LineKind::Username => tracing::debug!("Sending username"),
                        LineKind::Password => tracing::debug!("Sending password"),
                        LineKind::Command => {
                            tracing::info!("Authenticated to console");
                            tracing::debug!(command = %line.text, "Sending command");
                        }
                    }
                    framed.send(line.text.as_str()).await?;
                }
                Event::Complete(result) => {
                    tracing::debug!(bytes = result.len(), "Command complete");
                    let mut stream = framed.into_inner();
                    if let Err(e) = stream.shutdown().await {
                        tracing::debug!("Error shutting down console connection: {}", e);
                    }
                    return Ok(result);
                }
                Event::AuthenticationRejected => {
                    tracing::warn!("Console at {} rejected the credentials", address);
                    return Err(SessionError::AuthenticationFailure);
                }
            }
        }
    }

    let state = protocol.state();
    protocol.fail();
    tracing::warn!("Console closed the connection in state {}", state);
    Err(SessionError::PrematureClose { state })
}
