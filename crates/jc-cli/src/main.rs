//! jcli-bridge CLI
//!
//! Runs one command on a Jasmin jcli console per invocation:
//! - `exec` connects, logs in, runs the command and prints its output
//! - `config` inspects or creates the endpoint configuration file

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jc_core::config;
use jcli_bridge::commands::{self, EndpointArgs};
use jcli_bridge::output::{print_error, set_quiet};

#[derive(Parser)]
#[command(name = "jcli-bridge")]
#[command(author, version, about = "Run commands on a Jasmin jcli console")]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "JCLI_BRIDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute one command on the console and print its output
    Exec {
        /// Console command words, joined with spaces ("-" reads it from stdin).
        /// Options must come before the command.
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        command: Vec<String>,

        #[command(flatten)]
        endpoint: EndpointArgs,

        /// Print the result as a JSON object
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration (password masked)
    Show,
    /// Show config file path
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
    set_quiet(cli.quiet);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Exec {
            command,
            endpoint,
            json,
        } => {
            let endpoint_config = config::resolve_config(cli.config.as_deref())
                .context("Failed to load console configuration")?;
            let command = commands::read_command(&command)?;
            return commands::exec_command(&endpoint_config, &command, &endpoint.into(), json)
                .await;
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config_show(cli.config.as_deref())?;
            }
            ConfigAction::Path => {
                commands::config_path(cli.config.as_deref());
            }
            ConfigAction::Init { force } => {
                commands::config_init(cli.config.as_deref(), force)?;
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}
