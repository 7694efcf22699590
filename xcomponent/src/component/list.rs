//! Parsing of the full `component_list.txt` document.
//!
//! The document carries a `COMPONENTS` header, followed on the next line by
//! the list version, then a run of component blocks closed by `ENDOFLIST`:
//!
//! ```text
//! COMPONENTS
//! 42
//! COMPONENT com.laminarresearch.xplane_10.airports
//! ...
//! ENDOFLIST
//! ```

use std::collections::BTreeMap;

use tracing::debug;

use super::block::{ComponentBlock, VersionRange};
use super::error::{ComponentError, ComponentResult};

/// Line introducing the list version.
pub const COMPONENTS_MARKER: &str = "COMPONENTS";

/// Marker closing the component blocks.
pub const END_OF_LIST_MARKER: &str = "ENDOFLIST";

const BLOCK_TOKEN: &str = "COMPONENT ";

/// Parse every component block of a component list, in document order.
///
/// Text before the first `COMPONENT ` token and text from `ENDOFLIST` onward
/// are ignored. A document without any block yields an empty list.
pub fn parse_component_list(text: &str) -> ComponentResult<Vec<ComponentBlock>> {
    let Some((_, after_header)) = text.split_once(BLOCK_TOKEN) else {
        debug!("component list contains no COMPONENT blocks");
        return Ok(Vec::new());
    };

    let body = match after_header.split_once(END_OF_LIST_MARKER) {
        Some((body, _)) => body,
        None => after_header,
    };

    let blocks = body
        .split(BLOCK_TOKEN)
        .filter(|fragment| !fragment.trim().is_empty())
        .map(|fragment| ComponentBlock::parse(&format!("{}{}", BLOCK_TOKEN, fragment)))
        .collect::<ComponentResult<Vec<_>>>()?;

    debug!(count = blocks.len(), "Parsed component list");
    Ok(blocks)
}

/// Read the list version from the line following the `COMPONENTS` marker.
pub fn parse_component_list_version(text: &str) -> ComponentResult<u32> {
    let mut version = None;
    let mut marker_seen = false;
    let mut lines = text.lines().enumerate();

    while let Some((index, line)) = lines.next() {
        if line.trim_end() != COMPONENTS_MARKER {
            continue;
        }
        if marker_seen {
            return Err(ComponentError::DuplicateVersionMarker { line: index + 1 });
        }
        marker_seen = true;

        let parsed = lines.next().and_then(|(next_index, next)| {
            if next.trim_end() == COMPONENTS_MARKER {
                Some(Err(ComponentError::DuplicateVersionMarker {
                    line: next_index + 1,
                }))
            } else {
                next.trim().parse::<u32>().ok().map(Ok)
            }
        });
        match parsed {
            Some(Ok(v)) => version = Some(v),
            Some(Err(e)) => return Err(e),
            None => return Err(ComponentError::VersionNotFound),
        }
    }

    version.ok_or(ComponentError::VersionNotFound)
}

/// Map component names to their manifest version ranges.
///
/// When the same name appears more than once, the last block wins.
pub fn component_versions<'a, I>(components: I) -> BTreeMap<String, VersionRange>
where
    I: IntoIterator<Item = &'a ComponentBlock>,
{
    components
        .into_iter()
        .map(|c| (c.component_name().to_string(), c.manifest_versions()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::CdnServer;

    const COMPONENT_LIST: &str = "# mobile component list\n\
                                  COMPONENTS\n\
                                  42\n\
                                  COMPONENT com.laminarresearch.xplane_10.airports\n\
                                  SERVER_UNSECURE\n\
                                  /mobile/airports\n\
                                  MANIFEST_VERSIONS 3 7\n\
                                  REQUIRE_AUTH 0\n\
                                  SIM_VERSIONS 1100-1299\n\
                                  \n\
                                  COMPONENT com.laminarresearch.xplane_10.aircraft_c172\n\
                                  SERVER_SECURE\n\
                                  /mobile/aircraft/c172\n\
                                  MANIFEST_VERSIONS 1 2\n\
                                  REQUIRE_AUTH 1\n\
                                  SIM_VERSIONS 1200-1299\n\
                                  \n\
                                  ENDOFLIST\n\
                                  COMPONENT this is ignored\n";

    #[test]
    fn test_parse_two_blocks_in_order() {
        let blocks = parse_component_list(COMPONENT_LIST).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].component_name(), "airports");
        assert_eq!(blocks[0].cdn_server(), CdnServer::Unsecured);
        assert_eq!(blocks[1].component_name(), "aircraft_c172");
        assert_eq!(blocks[1].cdn_server(), CdnServer::Secure);
        assert!(blocks[1].require_auth());
    }

    #[test]
    fn test_parse_without_end_marker() {
        let text = COMPONENT_LIST.split(END_OF_LIST_MARKER).next().unwrap();
        let blocks = parse_component_list(text).unwrap();
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_parse_empty_list() {
        let blocks = parse_component_list("COMPONENTS\n1\nENDOFLIST\n").unwrap();
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_parse_propagates_malformed_block() {
        let broken = COMPONENT_LIST.replace("/mobile/aircraft/c172", "mobile/aircraft/c172");
        let err = parse_component_list(&broken).unwrap_err();
        assert!(matches!(err, ComponentError::MalformedBlock { line: 3, .. }));
    }

    #[test]
    fn test_serialized_blocks_reparse() {
        let blocks = parse_component_list(COMPONENT_LIST).unwrap();
        let mut text = String::from("COMPONENTS\n43\n");
        for block in &blocks {
            text.push_str(&block.to_string());
        }
        text.push_str(END_OF_LIST_MARKER);
        assert_eq!(parse_component_list(&text).unwrap(), blocks);
    }

    #[test]
    fn test_version() {
        assert_eq!(parse_component_list_version(COMPONENT_LIST).unwrap(), 42);
    }

    #[test]
    fn test_version_trailing_whitespace() {
        let text = "COMPONENTS  \r\n 17 \r\n";
        assert_eq!(parse_component_list_version(text).unwrap(), 17);
    }

    #[test]
    fn test_version_missing_marker() {
        let err = parse_component_list_version("COMPONENT foo\n12\n").unwrap_err();
        assert_eq!(err, ComponentError::VersionNotFound);
    }

    #[test]
    fn test_version_not_a_number() {
        let err = parse_component_list_version("COMPONENTS\nforty-two\n").unwrap_err();
        assert_eq!(err, ComponentError::VersionNotFound);
    }

    #[test]
    fn test_version_marker_at_end() {
        let err = parse_component_list_version("COMPONENTS").unwrap_err();
        assert_eq!(err, ComponentError::VersionNotFound);
    }

    #[test]
    fn test_version_duplicate_marker_adjacent() {
        let err = parse_component_list_version("COMPONENTS\nCOMPONENTS\n3\n").unwrap_err();
        assert_eq!(err, ComponentError::DuplicateVersionMarker { line: 2 });
    }

    #[test]
    fn test_version_duplicate_marker_later() {
        let err = parse_component_list_version("COMPONENTS\n3\nCOMPONENTS\n4\n").unwrap_err();
        assert_eq!(err, ComponentError::DuplicateVersionMarker { line: 3 });
    }

    #[test]
    fn test_component_versions() {
        let blocks = parse_component_list(COMPONENT_LIST).unwrap();
        let versions = component_versions(&blocks);
        assert_eq!(versions.len(), 2);
        assert_eq!(versions["airports"], VersionRange::new(3, 7));
        assert_eq!(versions["aircraft_c172"], VersionRange::new(1, 2));
    }

    #[test]
    fn test_component_versions_last_wins() {
        let mut blocks = parse_component_list(COMPONENT_LIST).unwrap();
        let newer = blocks[0]
            .clone()
            .with_manifest_versions(VersionRange::new(8, 9));
        blocks.push(newer);

        let versions = component_versions(&blocks);
        assert_eq!(versions.len(), 2);
        assert_eq!(versions["airports"], VersionRange::new(8, 9));
    }
}
