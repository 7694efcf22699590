//! Configuration management CLI commands.
//!
//! Provides `config get`, `config set`, `config list`, and `config path` for
//! viewing and changing settings without editing the INI file by hand.

use std::path::Path;

use clap::Subcommand;
use xcomponent::config::{ConfigFile, ConfigKey};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key in format section.key (e.g., sources.component_list)
        key: String,
    },

    /// Set a configuration value; an empty value unsets it
    Set {
        /// Configuration key in format section.key (e.g., logging.level)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand against the file at `config_path`.
pub fn run(command: ConfigCommands, config_path: &Path) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => {
            let config = ConfigFile::load_or_default(config_path)?;
            println!("{}", display_value(&get_value(&config, &key)?));
            Ok(())
        }
        ConfigCommands::Set { key, value } => {
            let key = set_value(config_path, &key, &value)?;
            println!("Set {} = {}", key.name(), value);
            Ok(())
        }
        ConfigCommands::List => {
            let config = ConfigFile::load_or_default(config_path)?;
            print!("{}", format_list(&config));
            Ok(())
        }
        ConfigCommands::Path => {
            println!("{}", config_path.display());
            Ok(())
        }
    }
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::UnknownConfigKey(format!(
            "Unknown configuration key '{}'. Use 'xcomponent config list' to see available keys.",
            key
        ))
    })
}

fn get_value(config: &ConfigFile, key: &str) -> Result<String, CliError> {
    Ok(parse_key(key)?.get(config))
}

/// Update one key in the file at `config_path`, keeping the others.
fn set_value(config_path: &Path, key: &str, value: &str) -> Result<ConfigKey, CliError> {
    let config_key = parse_key(key)?;
    let mut config = ConfigFile::load_or_default(config_path)?;
    config_key.set(&mut config, value)?;
    config.save(config_path)?;
    Ok(config_key)
}

fn display_value(value: &str) -> &str {
    if value.is_empty() {
        "(not set)"
    } else {
        value
    }
}

fn format_list(config: &ConfigFile) -> String {
    let mut out = String::new();
    let mut current_section = "";

    for key in ConfigKey::all() {
        let section = key.section();

        // Section header whenever the section changes
        if section != current_section {
            if !current_section.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("[{}]\n", section));
            current_section = section;
        }

        out.push_str(&format!(
            "  {} = {}\n",
            key.key_name(),
            display_value(&key.get(config))
        ));
    }

    out
}
