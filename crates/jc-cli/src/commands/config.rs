//! Configuration command implementations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use jc_core::config::{self, ConfigFile};

use crate::output::{print_info, print_success};

fn config_file_path(config_path: Option<&Path>) -> PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config::default_config_path)
}

/// Show the effective configuration (file, then environment)
pub fn config_show(config_path: Option<&Path>) -> Result<()> {
    let path = config_file_path(config_path);
    if config_path.is_none() && !path.exists() {
        print_info(&format!("No config file at {}, showing defaults", path.display()));
    }

    let console = config::resolve_config(config_path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    let file = ConfigFile {
        console: console.redacted(),
    };
    print!("{}", toml::to_string_pretty(&file)?);

    Ok(())
}

/// Print the config file location
pub fn config_path(config_path: Option<&Path>) {
    println!("{}", config_file_path(config_path).display());
}

/// Write a default configuration file
pub fn config_init(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = config_file_path(config_path);

    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    config::save_config(&path, &ConfigFile::default())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    print_success(&format!("Wrote default configuration to {}", path.display()));

    Ok(())
}
