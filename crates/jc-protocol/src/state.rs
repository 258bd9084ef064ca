//! Console session state machine
//!
//! [`ConsoleProtocol`] owns the receive buffer of one session and turns each
//! chunk of received text into the lines that must be written next. It never
//! touches a socket, so every transition can be exercised by feeding
//! synthetic chunks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::markers::PromptMarkers;
use crate::response::extract_response;

/// Progress of a console session. Sessions only ever move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Transport connection not yet established
    Connecting,
    /// Waiting for the console to ask for a login name
    AwaitingUsernamePrompt,
    /// Username written, waiting for the password request
    AwaitingPasswordPrompt,
    /// Password written, waiting for the welcome banner
    Authenticated,
    /// Command written, waiting for the ready prompt
    CommandSent,
    /// Response extracted
    Complete,
    /// Session aborted
    Failed,
}

impl SessionState {
    /// Whether the session can make no further progress
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Complete | SessionState::Failed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Connecting => "connecting",
            SessionState::AwaitingUsernamePrompt => "awaiting username prompt",
            SessionState::AwaitingPasswordPrompt => "awaiting password prompt",
            SessionState::Authenticated => "authenticated",
            SessionState::CommandSent => "command sent",
            SessionState::Complete => "complete",
            SessionState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Login credentials for the console
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// What an outgoing line carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Username,
    Password,
    Command,
}

/// A line the driver must write to the console (without terminator)
#[derive(Clone, PartialEq, Eq)]
pub struct OutgoingLine {
    pub kind: LineKind,
    pub text: String,
}

impl fmt::Debug for OutgoingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self.kind {
            LineKind::Password => "<redacted>",
            _ => self.text.as_str(),
        };
        f.debug_struct("OutgoingLine")
            .field("kind", &self.kind)
            .field("text", &text)
            .finish()
    }
}

/// Outcome of feeding received text to the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Write this line, in order
    Send(OutgoingLine),
    /// The command's response is complete
    Complete(String),
    /// The console rejected the credentials
    AuthenticationRejected,
}

/// State machine for a single connect-authenticate-execute cycle
#[derive(Debug)]
pub struct ConsoleProtocol {
    markers: PromptMarkers,
    credentials: Credentials,
    command: String,
    state: SessionState,
    buffer: String,
    /// Buffer length when the password was written
    password_offset: usize,
    /// Buffer length when the command was written
    response_offset: usize,
}

impl ConsoleProtocol {
    /// Create a session in the `Connecting` state
    pub fn new(markers: PromptMarkers, credentials: Credentials, command: impl Into<String>) -> Self {
        Self {
            markers,
            credentials,
            command: command.into(),
            state: SessionState::Connecting,
            buffer: String::new(),
            password_offset: 0,
            response_offset: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Everything received so far
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Command this session will run
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The transport is up; start waiting for the login prompt
    pub fn connected(&mut self) {
        if self.state == SessionState::Connecting {
            self.state = SessionState::AwaitingUsernamePrompt;
        }
    }

    /// Mark the session as failed (transport error, timeout, early close)
    pub fn fail(&mut self) {
        if !self.state.is_terminal() {
            self.state = SessionState::Failed;
        }
    }

    /// Append received text and advance as far as the buffer allows.
    ///
    /// Several prompts may arrive in one chunk, so this keeps evaluating
    /// until no transition fires. Detection always scans the accumulated
    /// buffer, never just the latest chunk, because a prompt may be split
    /// across reads.
    pub fn feed(&mut self, text: &str) -> Result<Vec<Event>, ProtocolError> {
        if self.state.is_terminal() {
            return Err(ProtocolError::SessionFinished(self.state));
        }

        self.buffer.push_str(text);
        // Receiving data implies the transport is up
        self.connected();

        let mut events = Vec::new();
        while let Some(event) = self.step() {
            let terminal = !matches!(event, Event::Send(_));
            events.push(event);
            if terminal {
                break;
            }
        }
        Ok(events)
    }

    fn step(&mut self) -> Option<Event> {
        match self.state {
            SessionState::AwaitingUsernamePrompt => {
                if !self.buffer.contains(self.markers.username_prompt.as_str()) {
                    return None;
                }
                tracing::debug!("Username prompt received");
                self.state = SessionState::AwaitingPasswordPrompt;
                Some(self.outgoing(LineKind::Username))
            }
            SessionState::AwaitingPasswordPrompt => {
                if !self.buffer.contains(self.markers.password_prompt.as_str()) {
                    return None;
                }
                tracing::debug!("Password prompt received");
                self.state = SessionState::Authenticated;
                self.password_offset = self.buffer.len();
                Some(self.outgoing(LineKind::Password))
            }
            SessionState::Authenticated => {
                let since_password = &self.buffer[self.password_offset..];
                if let Some(failure) = self.markers.auth_failure.as_deref() {
                    if since_password.contains(failure) {
                        self.state = SessionState::Failed;
                        return Some(Event::AuthenticationRejected);
                    }
                }
                // The banner ends with the console's first idle prompt; the
                // command goes out only once that prompt has arrived
                let banner = self.markers.welcome_banner.as_str();
                let banner_end = self.buffer.find(banner)? + banner.len();
                if !self.buffer[banner_end..].contains(self.markers.ready_prompt.as_str()) {
                    return None;
                }
                tracing::debug!("Console ready after login, sending command");
                self.state = SessionState::CommandSent;
                self.response_offset = self.buffer.len();
                Some(self.outgoing(LineKind::Command))
            }
            SessionState::CommandSent => {
                let region = &self.buffer[self.response_offset..];
                if !region.contains(self.markers.ready_prompt.as_str()) {
                    return None;
                }
                let result = extract_response(region, &self.markers.ready_prompt, &self.command);
                self.state = SessionState::Complete;
                Some(Event::Complete(result))
            }
            SessionState::Connecting | SessionState::Complete | SessionState::Failed => None,
        }
    }

    fn outgoing(&self, kind: LineKind) -> Event {
        let text = match kind {
            LineKind::Username => self.credentials.username.clone(),
            LineKind::Password => self.credentials.password.clone(),
            LineKind::Command => self.command.clone(),
        };
        Event::Send(OutgoingLine { kind, text })
    }
}
