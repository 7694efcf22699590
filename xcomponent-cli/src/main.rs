//! XComponent CLI - inspect component lists and component manifests.
//!
//! This binary is a thin front end over the `xcomponent` library.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use xcomponent::config::{default_config_path, ConfigFile};
use xcomponent::logging::init_logging;
use xcomponent::source::DiskSource;

use commands::common::{resolve_list_locators, ListLocators};
use commands::config::ConfigCommands;
use commands::manifest::ManifestOutput;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "xcomponent", version, about)]
struct Cli {
    /// Configuration file (defaults to ~/.xcomponent/config.ini)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List every block of a component list
    Components {
        /// Component list locator (defaults to [sources] component_list)
        locator: Option<String>,

        /// Locator to read when the primary one cannot be retrieved
        #[arg(long)]
        fallback: Option<String>,
    },

    /// Print the version of a component list
    ListVersion {
        /// Component list locator (defaults to [sources] component_list)
        locator: Option<String>,

        /// Locator to read when the primary one cannot be retrieved
        #[arg(long)]
        fallback: Option<String>,
    },

    /// Print each component's manifest version range
    Versions {
        /// Component list locator (defaults to [sources] component_list)
        locator: Option<String>,

        /// Locator to read when the primary one cannot be retrieved
        #[arg(long)]
        fallback: Option<String>,
    },

    /// Summarise a component manifest and its next version
    Manifest {
        /// Manifest locator; omit for a component without a prior manifest
        locator: Option<String>,

        /// List every entry
        #[arg(long)]
        entries: bool,

        /// List the file history
        #[arg(long)]
        history: bool,
    },

    /// Print the merged library.txt exports of a scenery pack
    Library {
        /// Scenery pack directory
        scenery_pack: PathBuf,
    },

    /// View or change configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = ConfigFile::load_or_default(&config_path)?;

    let mut logging = config.logging.clone().with_verbosity(cli.verbose);
    if let Some(file) = &cli.log_file {
        logging = logging.with_file(file);
    }
    // Keep the guard alive so the log file is flushed on exit.
    let _guard = init_logging(&logging).map_err(CliError::Logging)?;
    debug!(config = %config_path.display(), "Loaded configuration");

    let source = DiskSource::new();
    let list_locators = |locator, fallback| -> Result<ListLocators, CliError> {
        resolve_list_locators(locator, fallback, &config)
    };

    match cli.command {
        Commands::Components { locator, fallback } => {
            commands::components::run_components(&source, &list_locators(locator, fallback)?)
        }
        Commands::ListVersion { locator, fallback } => {
            commands::components::run_list_version(&source, &list_locators(locator, fallback)?)
        }
        Commands::Versions { locator, fallback } => {
            commands::components::run_versions(&source, &list_locators(locator, fallback)?)
        }
        Commands::Manifest {
            locator,
            entries,
            history,
        } => commands::manifest::run(
            &source,
            locator.as_deref(),
            ManifestOutput { entries, history },
        ),
        Commands::Library { scenery_pack } => commands::library::run(&scenery_pack),
        Commands::Config { command } => commands::config::run(command, &config_path),
    }
}
