//! jcli-bridge: Command-line interface for the Jasmin jcli console
//!
//! Provides the `jcli-bridge` CLI, which runs one console command per
//! invocation and manages the endpoint configuration file.

pub mod commands;
pub mod output;
