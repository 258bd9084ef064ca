//! jc-protocol: Prompt detection for the Jasmin jcli console
//!
//! This crate holds the socket-free half of a console session: the text
//! codec used on the TCP stream, the prompt markers, and the state machine
//! that decides what to write next from the accumulated receive buffer.

pub mod codec;
pub mod error;
pub mod markers;
pub mod response;
pub mod state;

pub use codec::{ConsoleCodec, LINE_TERMINATOR};
pub use error::ProtocolError;
pub use markers::PromptMarkers;
pub use response::extract_response;
pub use state::{ConsoleProtocol, Credentials, Event, LineKind, OutgoingLine, SessionState};
