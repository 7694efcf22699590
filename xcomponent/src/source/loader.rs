//! Fetch-then-parse helpers combining a [`TextSource`] with the parsers.

use tracing::{info, warn};

use super::disk::TextSource;
use super::error::SourceResult;
use crate::component::{parse_component_list, parse_component_list_version, ComponentBlock};
use crate::manifest::ComponentManifest;

/// A missing or blank manifest locator means there is no prior manifest.
fn manifest_locator(locator: Option<&str>) -> Option<&str> {
    locator.filter(|l| !l.trim().is_empty())
}

/// Fetch and parse a component manifest.
///
/// A `None` or blank locator means the component has no manifest yet;
/// nothing is fetched and `Ok(None)` is returned. An empty document is
/// treated the same way.
pub fn load_manifest<S: TextSource>(
    source: &S,
    locator: Option<&str>,
) -> SourceResult<Option<ComponentManifest>> {
    let Some(locator) = manifest_locator(locator) else {
        return Ok(None);
    };
    let text = source.fetch(locator)?;
    Ok(ComponentManifest::parse(Some(&text))?)
}

/// Fetch and parse a component manifest, also returning the next version.
pub fn load_manifest_with_next_version<S: TextSource>(
    source: &S,
    locator: Option<&str>,
) -> SourceResult<(Option<ComponentManifest>, u32)> {
    let text = manifest_locator(locator)
        .map(|l| source.fetch(l))
        .transpose()?;
    Ok(ComponentManifest::parse_with_next_version(text.as_deref())?)
}

/// Fetch a component list, falling back to a second locator when the first
/// cannot be retrieved.
///
/// Only retrieval failures trigger the fallback; a list that was fetched but
/// fails to parse is reported as is.
pub fn fetch_component_list<S: TextSource>(
    source: &S,
    locator: &str,
    fallback: Option<&str>,
) -> SourceResult<String> {
    match (source.fetch(locator), fallback) {
        (Ok(text), _) => Ok(text),
        (Err(e), Some(fallback)) if e.is_retrieval() => {
            warn!(
                locator,
                fallback,
                error = %e,
                "Failed to read component list; falling back to local copy"
            );
            source.fetch(fallback)
        }
        (Err(e), _) => Err(e),
    }
}

/// Fetch and parse every block of a component list.
pub fn load_component_list<S: TextSource>(
    source: &S,
    locator: &str,
    fallback: Option<&str>,
) -> SourceResult<Vec<ComponentBlock>> {
    let text = fetch_component_list(source, locator, fallback)?;
    let blocks = parse_component_list(&text)?;
    info!(count = blocks.len(), "Loaded component list");
    Ok(blocks)
}

/// Fetch a component list and read its version.
pub fn load_component_list_version<S: TextSource>(
    source: &S,
    locator: &str,
    fallback: Option<&str>,
) -> SourceResult<u32> {
    let text = fetch_component_list(source, locator, fallback)?;
    Ok(parse_component_list_version(&text)?)
}
