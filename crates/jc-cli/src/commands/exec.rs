//! Exec command implementation

use std::io::Read;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

use jc_client::ConsoleClient;
use jc_core::{EndpointConfig, EndpointOverrides};

use crate::output::print_error;

/// Endpoint settings that override the configuration for one invocation
#[derive(Args, Debug, Default, Clone)]
pub struct EndpointArgs {
    /// Console host
    #[arg(long)]
    pub host: Option<String>,

    /// Console port
    #[arg(long)]
    pub port: Option<u16>,

    /// Console login name
    #[arg(long)]
    pub username: Option<String>,

    /// Console password
    #[arg(long)]
    pub password: Option<String>,

    /// Session timeout in milliseconds
    #[arg(long = "timeout-ms", value_name = "MS")]
    pub timeout_ms: Option<u64>,
}

impl From<EndpointArgs> for EndpointOverrides {
    fn from(args: EndpointArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            username: args.username,
            password: args.password,
            timeout: args.timeout_ms.map(Duration::from_millis),
        }
    }
}

/// Build the command text from the positional words.
///
/// A single `-` reads the whole command from stdin, which allows multi-line
/// console directives.
pub fn read_command(words: &[String]) -> Result<String> {
    if let [only] = words {
        if only == "-" {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read command from stdin")?;
            return Ok(input.trim_end_matches(['\r', '\n']).to_string());
        }
    }
    Ok(words.join(" "))
}

/// Execute the exec command.
///
/// A failed session is reported here, on stdout as JSON or on stderr, and
/// turns into a failure exit code. Only setup problems are returned as
/// errors.
pub async fn exec_command(
    config: &EndpointConfig,
    command: &str,
    overrides: &EndpointOverrides,
    as_json: bool,
) -> Result<ExitCode> {
    let client = ConsoleClient::new(config.clone()).context("Invalid console configuration")?;
    tracing::debug!(?overrides, "Running console command {:?}", command);

    match client.run_command_with(command, overrides).await {
        Ok(result) => {
            if as_json {
                println!("{}", json!({ "result": result }));
            } else {
                println!("{}", result);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            if as_json {
                println!(
                    "{}",
                    json!({
                        "message": "Failed to execute command",
                        "kind": e.kind(),
                        "error": e.to_string(),
                    })
                );
            } else {
                print_error(&format!("Failed to execute command: {}", e));
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
