//! Component list CLI commands.
//!
//! - `components`: print every block of a component list
//! - `list-version`: print the list's own version
//! - `versions`: print each component's manifest version range

use std::collections::BTreeMap;
use std::fmt::Write as _;

use xcomponent::component::{component_versions, ComponentBlock, VersionRange};
use xcomponent::source::{load_component_list, load_component_list_version, TextSource};

use super::common::ListLocators;
use crate::error::CliError;

/// Print every block of the component list.
pub fn run_components<S: TextSource>(source: &S, locators: &ListLocators) -> Result<(), CliError> {
    let blocks = load_component_list(source, &locators.primary, locators.fallback.as_deref())?;
    print!("{}", format_blocks(&blocks));
    Ok(())
}

/// Print the component list version.
pub fn run_list_version<S: TextSource>(
    source: &S,
    locators: &ListLocators,
) -> Result<(), CliError> {
    let version =
        load_component_list_version(source, &locators.primary, locators.fallback.as_deref())?;
    println!("{}", version);
    Ok(())
}

/// Print each component's manifest version range.
pub fn run_versions<S: TextSource>(source: &S, locators: &ListLocators) -> Result<(), CliError> {
    let blocks = load_component_list(source, &locators.primary, locators.fallback.as_deref())?;
    print!("{}", format_versions(&component_versions(&blocks)));
    Ok(())
}

fn format_blocks(blocks: &[ComponentBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        let _ = writeln!(out, "{}", block.component_name());
        let _ = writeln!(out, "  Server:            {}", block.cdn_server());
        let _ = writeln!(out, "  Package path:      {}", block.package_path());
        let _ = writeln!(
            out,
            "  Manifest versions: {}-{}",
            block.manifest_versions().low, block.manifest_versions().high
        );
        let _ = writeln!(out, "  Requires auth:     {}", block.require_auth());
        let _ = writeln!(
            out,
            "  Sim versions:      {}-{}",
            block.sim_versions().low, block.sim_versions().high
        );
    }
    let _ = writeln!(out, "{} components", blocks.len());
    out
}

fn format_versions(versions: &BTreeMap<String, VersionRange>) -> String {
    let width = versions.keys().map(String::len).max().unwrap_or(0);
    let mut out = String::new();
    for (name, range) in versions {
        let _ = writeln!(out, "{:<width$}  {}-{}", name, range.low, range.high);
    }
    out
}
