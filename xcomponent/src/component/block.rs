//! The six-line `COMPONENT` record of `component_list.txt`.
//!
//! ```text
//! COMPONENT com.laminarresearch.xplane_10.airports
//! SERVER_UNSECURE
//! /mobile/airports
//! MANIFEST_VERSIONS 3 7
//! REQUIRE_AUTH 0
//! SIM_VERSIONS 1100-1299
//! ```

use std::fmt;
use std::str::FromStr;

use super::cdn::CdnServer;
use super::error::{ComponentError, ComponentResult};

/// Reverse-DNS prefix shared by every component name.
pub const COMPONENT_NAME_PREFIX: &str = "com.laminarresearch.xplane_10.";

/// Keyword opening a component block.
pub const COMPONENT_KEYWORD: &str = "COMPONENT";

const BLOCK_LINE_COUNT: usize = 6;

/// Inclusive `low..=high` version range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionRange {
    pub low: u32,
    pub high: u32,
}

impl VersionRange {
    pub fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    /// Check whether `version` falls inside the range.
    pub fn contains(&self, version: u32) -> bool {
        self.low <= version && version <= self.high
    }
}

/// One component entry of the component list.
///
/// Fields are only readable through accessors, so every block upholds the
/// rules [`ComponentBlock::parse`] enforces and serialises back to itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentBlock {
    component_name: String,
    cdn_server: CdnServer,
    package_path: String,
    manifest_versions: VersionRange,
    require_auth: bool,
    sim_versions: VersionRange,
}

impl ComponentBlock {
    /// Build a block programmatically.
    ///
    /// The name must be non-empty and free of whitespace. The package path
    /// must be absolute, free of control characters and must not end in
    /// whitespace.
    pub fn new(
        component_name: impl Into<String>,
        cdn_server: CdnServer,
        package_path: impl Into<String>,
        manifest_versions: VersionRange,
        require_auth: bool,
        sim_versions: VersionRange,
    ) -> ComponentResult<Self> {
        let component_name = component_name.into();
        let package_path = package_path.into();
        validate_component_name(&component_name)?;
        validate_package_path(&package_path)?;
        Ok(Self {
            component_name,
            cdn_server,
            package_path,
            manifest_versions,
            require_auth,
            sim_versions,
        })
    }

    /// Name without the [`COMPONENT_NAME_PREFIX`].
    pub fn component_name(&self) -> &str {
        &self.component_name
    }

    /// CDN pool serving the component.
    pub fn cdn_server(&self) -> CdnServer {
        self.cdn_server
    }

    /// Absolute path of the package on the server. Always starts with `/`.
    pub fn package_path(&self) -> &str {
        &self.package_path
    }

    /// Manifest versions this block applies to.
    pub fn manifest_versions(&self) -> VersionRange {
        self.manifest_versions
    }

    /// Whether downloads require authentication.
    pub fn require_auth(&self) -> bool {
        self.require_auth
    }

    /// Supported app (sim) versions.
    pub fn sim_versions(&self) -> VersionRange {
        self.sim_versions
    }

    /// Copy of this block covering different manifest versions.
    pub fn with_manifest_versions(mut self, manifest_versions: VersionRange) -> Self {
        self.manifest_versions = manifest_versions;
        self
    }

    /// Fully qualified component name, including the reverse-DNS prefix.
    pub fn qualified_name(&self) -> String {
        format!("{}{}", COMPONENT_NAME_PREFIX, self.component_name)
    }

    /// Parse a block of exactly six lines.
    ///
    /// Surrounding blank lines are ignored.
    pub fn parse(text: &str) -> ComponentResult<Self> {
        let lines: Vec<&str> = text.trim().lines().map(str::trim_end).collect();
        if lines.len() != BLOCK_LINE_COUNT {
            return Err(ComponentError::malformed(
                0,
                format!(
                    "expected {} lines (COMPONENT, server, package path, MANIFEST_VERSIONS, \
                     REQUIRE_AUTH, SIM_VERSIONS), found {}",
                    BLOCK_LINE_COUNT,
                    lines.len()
                ),
            ));
        }

        let component_name = parse_component_name(lines[0])?;

        let cdn_server = CdnServer::from_component_list_token(lines[1]).ok_or_else(|| {
            ComponentError::malformed(2, format!("unknown CDN server token: {}", lines[1]))
        })?;

        let package_path = lines[2];
        let manifest_versions = parse_manifest_versions(lines[3])?;
        let require_auth = parse_require_auth(lines[4])?;
        let sim_versions = parse_sim_versions(lines[5])?;

        Self::new(
            component_name,
            cdn_server,
            package_path,
            manifest_versions,
            require_auth,
            sim_versions,
        )
    }
}

impl FromStr for ComponentBlock {
    type Err = ComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ComponentBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", COMPONENT_KEYWORD, self.qualified_name())?;
        writeln!(f, "{}", self.cdn_server.component_list_token())?;
        writeln!(f, "{}", self.package_path)?;
        writeln!(
            f,
            "MANIFEST_VERSIONS {} {}",
            self.manifest_versions.low, self.manifest_versions.high
        )?;
        writeln!(f, "REQUIRE_AUTH {}", u8::from(self.require_auth))?;
        writeln!(
            f,
            "SIM_VERSIONS {}-{}",
            self.sim_versions.low, self.sim_versions.high
        )?;
        writeln!(f)
    }
}

/// Strip `keyword` from the start of `line`, requiring whitespace after it.
fn keyword_value<'a>(line: &'a str, keyword: &str, line_no: usize) -> ComponentResult<&'a str> {
    line.strip_prefix(keyword)
        .filter(|rest| rest.starts_with(char::is_whitespace))
        .map(str::trim)
        .ok_or_else(|| ComponentError::malformed(line_no, format!("expected {} line", keyword)))
}

fn validate_component_name(name: &str) -> ComponentResult<()> {
    if name.is_empty() {
        return Err(ComponentError::malformed(1, "empty component name"));
    }
    if name.contains(|c: char| c.is_whitespace() || c.is_control()) {
        return Err(ComponentError::malformed(
            1,
            format!("component name contains whitespace: {:?}", name),
        ));
    }
    Ok(())
}

fn validate_package_path(path: &str) -> ComponentResult<()> {
    if !path.starts_with('/') {
        return Err(ComponentError::malformed(
            3,
            format!("package path is not absolute: {}", path),
        ));
    }
    if path.contains(char::is_control) || path.ends_with(char::is_whitespace) {
        return Err(ComponentError::malformed(
            3,
            format!("package path has trailing whitespace or control characters: {:?}", path),
        ));
    }
    Ok(())
}

fn parse_number(value: &str, line_no: usize, what: &str) -> ComponentResult<u32> {
    value
        .parse::<u32>()
        .map_err(|_| ComponentError::malformed(line_no, format!("invalid {}: {}", what, value)))
}

fn parse_component_name(line: &str) -> ComponentResult<String> {
    let qualified = keyword_value(line, COMPONENT_KEYWORD, 1)?;
    let name = qualified.strip_prefix(COMPONENT_NAME_PREFIX).ok_or_else(|| {
        ComponentError::malformed(
            1,
            format!("component name must start with {}", COMPONENT_NAME_PREFIX),
        )
    })?;
    Ok(name.to_string())
}

fn parse_manifest_versions(line: &str) -> ComponentResult<VersionRange> {
    let value = keyword_value(line, "MANIFEST_VERSIONS", 4)?;
    let parts: Vec<&str> = value.split_whitespace().collect();
    match parts.as_slice() {
        [low, high] => Ok(VersionRange::new(
            parse_number(low, 4, "manifest version")?,
            parse_number(high, 4, "manifest version")?,
        )),
        _ => Err(ComponentError::malformed(
            4,
            format!("expected two manifest versions, found: {}", value),
        )),
    }
}

fn parse_require_auth(line: &str) -> ComponentResult<bool> {
    match keyword_value(line, "REQUIRE_AUTH", 5)? {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(ComponentError::malformed(
            5,
            format!("REQUIRE_AUTH must be 0 or 1, found: {}", other),
        )),
    }
}

fn parse_sim_versions(line: &str) -> ComponentResult<VersionRange> {
    let value = keyword_value(line, "SIM_VERSIONS", 6)?;
    let (low, high) = value
        .split_once('-')
        .or_else(|| value.split_once(char::is_whitespace))
        .ok_or_else(|| {
            ComponentError::malformed(6, format!("expected <low>-<high>, found: {}", value))
        })?;
    Ok(VersionRange::new(
        parse_number(low.trim(), 6, "sim version")?,
        parse_number(high.trim(), 6, "sim version")?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const AIRPORTS_BLOCK: &str = "COMPONENT com.laminarresearch.xplane_10.airports\n\
                                  SERVER_UNSECURE\n\
                                  /mobile/airports\n\
                                  MANIFEST_VERSIONS 3 7\n\
                                  REQUIRE_AUTH 0\n\
                                  SIM_VERSIONS 1100-1299\n\n";

    fn airports() -> ComponentBlock {
        ComponentBlock::new(
            "airports",
            CdnServer::Unsecured,
            "/mobile/airports",
            VersionRange::new(3, 7),
            false,
            VersionRange::new(1100, 1299),
        )
        .unwrap()
    }

    fn replace_line(index: usize, replacement: &str) -> String {
        let mut lines: Vec<&str> = AIRPORTS_BLOCK.trim().lines().collect();
        lines[index] = replacement;
        lines.join("\n")
    }

    #[test]
    fn test_parse_block() {
        let block = ComponentBlock::parse(AIRPORTS_BLOCK).unwrap();
        assert_eq!(block, airports());
    }

    #[test]
    fn test_serialize_block() {
        assert_eq!(airports().to_string(), AIRPORTS_BLOCK);
    }

    #[test]
    fn test_from_str() {
        let block: ComponentBlock = AIRPORTS_BLOCK.parse().unwrap();
        assert_eq!(block.component_name(), "airports");
    }

    #[test]
    fn test_parse_tolerates_crlf() {
        let crlf = AIRPORTS_BLOCK.replace('\n', "\r\n");
        assert_eq!(ComponentBlock::parse(&crlf).unwrap(), airports());
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(
            airports().qualified_name(),
            "com.laminarresearch.xplane_10.airports"
        );
    }

    #[test]
    fn test_require_auth_secure() {
        let text = replace_line(4, "REQUIRE_AUTH 1");
        let text = text.replace("SERVER_UNSECURE", "SERVER_SECURE");
        let block = ComponentBlock::parse(&text).unwrap();
        assert!(block.require_auth());
        assert_eq!(block.cdn_server(), CdnServer::Secure);
    }

    #[test]
    fn test_sim_versions_whitespace_separated() {
        let text = replace_line(5, "SIM_VERSIONS 1100 1299");
        let block = ComponentBlock::parse(&text).unwrap();
        assert_eq!(block.sim_versions(), VersionRange::new(1100, 1299));
    }

    #[test]
    fn test_wrong_line_count() {
        let five_lines: Vec<&str> = AIRPORTS_BLOCK.trim().lines().take(5).collect();
        let err = ComponentBlock::parse(&five_lines.join("\n")).unwrap_err();
        assert!(matches!(err, ComponentError::MalformedBlock { line: 0, .. }));
    }

    #[test]
    fn test_relative_package_path() {
        let err = ComponentBlock::parse(&replace_line(2, "mobile/airports")).unwrap_err();
        assert!(matches!(err, ComponentError::MalformedBlock { line: 3, .. }));
    }

    #[test]
    fn test_missing_component_keyword() {
        let text = replace_line(0, "COMPONENTS com.laminarresearch.xplane_10.airports");
        let err = ComponentBlock::parse(&text).unwrap_err();
        assert!(matches!(err, ComponentError::MalformedBlock { line: 1, .. }));
    }

    #[test]
    fn test_missing_name_prefix() {
        let err = ComponentBlock::parse(&replace_line(0, "COMPONENT org.example.airports"))
            .unwrap_err();
        assert!(matches!(err, ComponentError::MalformedBlock { line: 1, .. }));
    }

    #[test]
    fn test_missing_manifest_versions_keyword() {
        let err = ComponentBlock::parse(&replace_line(3, "VERSIONS 3 7")).unwrap_err();
        assert!(matches!(err, ComponentError::MalformedBlock { line: 4, .. }));
    }

    #[test]
    fn test_single_manifest_version() {
        let err = ComponentBlock::parse(&replace_line(3, "MANIFEST_VERSIONS 3")).unwrap_err();
        assert!(matches!(err, ComponentError::MalformedBlock { line: 4, .. }));
    }

    #[test]
    fn test_missing_require_auth_keyword() {
        let err = ComponentBlock::parse(&replace_line(4, "AUTH 0")).unwrap_err();
        assert!(matches!(err, ComponentError::MalformedBlock { line: 5, .. }));
    }

    #[test]
    fn test_require_auth_not_boolean() {
        let err = ComponentBlock::parse(&replace_line(4, "REQUIRE_AUTH yes")).unwrap_err();
        assert!(matches!(err, ComponentError::MalformedBlock { line: 5, .. }));
    }

    #[test]
    fn test_missing_sim_versions_keyword() {
        let err = ComponentBlock::parse(&replace_line(5, "1100-1299")).unwrap_err();
        assert!(matches!(err, ComponentError::MalformedBlock { line: 6, .. }));
    }

    #[test]
    fn test_unknown_server_token() {
        let err = ComponentBlock::parse(&replace_line(1, "SERVER_FAST")).unwrap_err();
        assert!(matches!(err, ComponentError::MalformedBlock { line: 2, .. }));
    }

    #[test]
    fn test_new_rejects_relative_path() {
        let result = ComponentBlock::new(
            "airports",
            CdnServer::Secure,
            "relative",
            VersionRange::new(1, 1),
            true,
            VersionRange::new(1, 2),
        );
        assert!(result.is_err());
    }

    fn build(name: &str, package_path: &str) -> ComponentResult<ComponentBlock> {
        ComponentBlock::new(
            name,
            CdnServer::Unsecured,
            package_path,
            VersionRange::new(1, 2),
            false,
            VersionRange::new(1100, 1299),
        )
    }

    #[test]
    fn test_new_rejects_empty_name() {
        let err = build("", "/mobile/airports").unwrap_err();
        assert!(matches!(err, ComponentError::MalformedBlock { line: 1, .. }));
    }

    #[test]
    fn test_new_rejects_whitespace_in_name() {
        for name in ["air ports", "airports ", "air\nports", "airports\r"] {
            let err = build(name, "/mobile/airports").unwrap_err();
            assert!(
                matches!(err, ComponentError::MalformedBlock { line: 1, .. }),
                "{:?} accepted",
                name
            );
        }
    }

    #[test]
    fn test_new_rejects_trailing_whitespace_in_path() {
        let err = build("airports", "/mobile/airports ").unwrap_err();
        assert!(matches!(err, ComponentError::MalformedBlock { line: 3, .. }));
    }

    #[test]
    fn test_new_rejects_newline_in_path() {
        let err = build("airports", "/mobile\nairports").unwrap_err();
        assert!(matches!(err, ComponentError::MalformedBlock { line: 3, .. }));
    }

    #[test]
    fn test_new_allows_inner_spaces_in_path() {
        let block = build("airports", "/mobile/global airports").unwrap();
        assert_eq!(ComponentBlock::parse(&block.to_string()).unwrap(), block);
    }

    #[test]
    fn test_parse_rejects_whitespace_in_name() {
        let text = replace_line(0, "COMPONENT com.laminarresearch.xplane_10.air ports");
        let err = ComponentBlock::parse(&text).unwrap_err();
        assert!(matches!(err, ComponentError::MalformedBlock { line: 1, .. }));
    }

    #[test]
    fn test_with_manifest_versions() {
        let block = airports().with_manifest_versions(VersionRange::new(8, 9));
        assert_eq!(block.manifest_versions(), VersionRange::new(8, 9));
        assert_eq!(block.component_name(), "airports");
    }

    #[test]
    fn test_version_range_contains() {
        let range = VersionRange::new(3, 7);
        assert!(range.contains(3));
        assert!(range.contains(7));
        assert!(!range.contains(2));
        assert!(!range.contains(8));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn server() -> impl Strategy<Value = CdnServer> {
            prop_oneof![Just(CdnServer::Secure), Just(CdnServer::Unsecured)]
        }

        proptest! {
            #[test]
            fn test_parse_serialize_roundtrip(
                name in "[a-z][a-z0-9_]{0,20}",
                cdn_server in server(),
                package_path in "/[A-Za-z0-9_/.-]{0,40}",
                manifest_low in 0u32..10_000,
                manifest_high in 0u32..10_000,
                require_auth in any::<bool>(),
                sim_low in 0u32..100_000,
                sim_high in 0u32..100_000,
            ) {
                let block = ComponentBlock::new(
                    name,
                    cdn_server,
                    package_path,
                    VersionRange::new(manifest_low, manifest_high),
                    require_auth,
                    VersionRange::new(sim_low, sim_high),
                )?;
                let reparsed = ComponentBlock::parse(&block.to_string())?;
                prop_assert_eq!(reparsed, block);
            }

            #[test]
            fn test_accepted_blocks_always_roundtrip(
                name in "[a-z \t\r\n]{0,8}",
                package_path in "/?[a-z/ \t\r\n]{0,12}",
            ) {
                let built = ComponentBlock::new(
                    name,
                    CdnServer::Secure,
                    package_path,
                    VersionRange::new(1, 2),
                    true,
                    VersionRange::new(3, 4),
                );
                if let Ok(block) = built {
                    let reparsed = ComponentBlock::parse(&block.to_string())?;
                    prop_assert_eq!(reparsed, block);
                }
            }
        }
    }
}
