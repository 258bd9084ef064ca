//! jc-client: Console session client for the Jasmin jcli console
//!
//! Each call opens a fresh TCP connection, logs in by answering the
//! console's prompts, runs exactly one command and disconnects. Prompt
//! detection lives in `jc-protocol`; this crate owns the connection
//! lifecycle and the timeout.

pub mod client;
pub mod session;

pub use client::ConsoleClient;
pub use session::execute;
