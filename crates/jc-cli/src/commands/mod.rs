//! CLI command implementations

mod config;
mod exec;

pub use config::{config_init, config_path, config_show};
pub use exec::{exec_command, read_command, EndpointArgs};
