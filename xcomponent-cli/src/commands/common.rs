//! Common types and utilities shared across CLI commands.

use xcomponent::config::ConfigFile;

use crate::error::CliError;

/// Component list locations after merging CLI arguments with the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLocators {
    pub primary: String,
    pub fallback: Option<String>,
}

/// Resolve component list locators from CLI args and config.
pub fn resolve_list_locators(
    cli_locator: Option<String>,
    cli_fallback: Option<String>,
    config: &ConfigFile,
) -> Result<ListLocators, CliError> {
    // CLI takes precedence, then config
    let primary = cli_locator
        .or_else(|| config.sources.component_list.clone())
        .ok_or(CliError::MissingLocator("component list locator"))?;
    let fallback = cli_fallback.or_else(|| config.sources.component_list_fallback.clone());

    Ok(ListLocators { primary, fallback })
}
