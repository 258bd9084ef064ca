//! Core traits for jcli-bridge

mod runner;

pub use runner::CommandRunner;
