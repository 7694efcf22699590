//! CLI error type.

use std::fmt;
use std::process;

use xcomponent::config::ConfigError;
use xcomponent::library::LibraryError;
use xcomponent::source::SourceError;

/// Errors reported to the user by the CLI.
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be loaded.
    Config(ConfigError),
    /// Logging could not be initialised.
    Logging(std::io::Error),
    /// A component list or manifest could not be fetched or parsed.
    Source(SourceError),
    /// Scenery library indexes could not be read.
    Library(LibraryError),
    /// A configuration key name that does not exist.
    UnknownConfigKey(String),
    /// A required argument was neither given nor configured.
    MissingLocator(&'static str),
}

impl CliError {
    /// Print the error and exit with status 1.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        process::exit(1);
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Logging(e) => write!(f, "Failed to initialise logging: {}", e),
            CliError::Source(e) => write!(f, "{}", e),
            CliError::Library(e) => write!(f, "Library index error: {}", e),
            CliError::UnknownConfigKey(msg) => write!(f, "{}", msg),
            CliError::MissingLocator(what) => write!(
                f,
                "No {} given. Pass one on the command line or set it in config.ini",
                what
            ),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Logging(e) => Some(e),
            CliError::Source(e) => Some(e),
            CliError::Library(e) => Some(e),
            CliError::UnknownConfigKey(_) | CliError::MissingLocator(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<SourceError> for CliError {
    fn from(e: SourceError) -> Self {
        CliError::Source(e)
    }
}

impl From<LibraryError> for CliError {
    fn from(e: LibraryError) -> Self {
        CliError::Library(e)
    }
}
