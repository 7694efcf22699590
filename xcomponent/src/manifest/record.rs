//! Line grammar of the component manifest.
//!
//! Each line holds one record, identified by its leading keyword. Field
//! layouts are shared with the external manifest producer and must match it
//! exactly:
//!
//! ```text
//! MANIFEST_VERSION <int>
//! INSTALL_PATH_PREFIX <escaped path>
//! RAWFILE <int> <int> <int> <int> <token> <float> <hash> <escaped path> <escaped path>
//! ZIP <float> <hash> <escaped path> <escaped path>
//! ZIPFILE <int> <int> <int> <int> <token> <float> <hash> <path to end of line>
//! FILE_HISTORY <int> <path to end of line>
//! ```
//!
//! An escaped path is a run of non-whitespace characters in which a
//! backslash escapes the following character, so `Earth\ nav\ data` is one
//! field.

use std::sync::OnceLock;

use regex::Regex;

// Building blocks shared by the record patterns.
const INT: &str = r"([-+]?\d+)";
const FLOAT: &str = r"([+-]?(?:[0-9]*[.])?[0-9]+)";
const TOKEN: &str = r"(\S+)";
const ESCAPED_PATH: &str = r"((?:[^\\\s]|\\.)+)";
const REST: &str = r"(.+)";

/// One recognised manifest line, borrowing its fields from the source text.
///
/// Path fields are returned exactly as written (still escaped).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Record<'a> {
    Version(u32),
    InstallPathPrefix(&'a str),
    RawFile { hash: &'a str, path: &'a str },
    Zip { hash: &'a str, path: &'a str },
    ZipFile { hash: &'a str, path: &'a str },
    FileHistory { version: u32, path: &'a str },
}

struct Grammar {
    version: Regex,
    install_path_prefix: Regex,
    raw_file: Regex,
    zip: Regex,
    zip_file: Regex,
    file_history: Regex,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("manifest grammar pattern is valid")
}

fn grammar() -> &'static Grammar {
    static GRAMMAR: OnceLock<Grammar> = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        let file_fields = format!(r"{INT}\s+{INT}\s+{INT}\s+{INT}\s+{TOKEN}\s+{FLOAT}\s+{TOKEN}");
        Grammar {
            version: compile(r"^MANIFEST_VERSION\s+([0-9]+)\s*$"),
            install_path_prefix: compile(r"^INSTALL_PATH_PREFIX\s+(.*)"),
            raw_file: compile(&format!(
                r"^RAWFILE\s+{file_fields}\s+{ESCAPED_PATH}\s+{ESCAPED_PATH}"
            )),
            zip: compile(&format!(
                r"^ZIP\s+{FLOAT}\s+{TOKEN}\s+{ESCAPED_PATH}\s+{ESCAPED_PATH}"
            )),
            zip_file: compile(&format!(r"^ZIPFILE\s+{file_fields}\s+{REST}")),
            file_history: compile(&format!(r"^FILE_HISTORY\s+([0-9]+)\s+{REST}")),
        }
    })
}

impl<'a> Record<'a> {
    /// Match a `MANIFEST_VERSION` header line, returning its digits.
    pub(crate) fn version_digits(line: &str) -> Option<&str> {
        grammar()
            .version
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    /// Match a `MANIFEST_VERSION` header line.
    ///
    /// Versions that do not fit a `u32`, or whose successor would not, yield
    /// `None`.
    pub(crate) fn parse_version(line: &str) -> Option<u32> {
        Self::version_digits(line)?
            .parse::<u32>()
            .ok()
            .filter(|version| version.checked_add(1).is_some())
    }

    /// Match any record kind.
    ///
    /// Returns `None` when the line is not a well-formed record of any kind.
    pub(crate) fn parse(line: &'a str) -> Option<Self> {
        let g = grammar();
        let field = |caps: &regex::Captures<'a>, i: usize| caps.get(i).map(|m| m.as_str());

        if let Some(caps) = g.raw_file.captures(line) {
            return Some(Record::RawFile {
                hash: field(&caps, 7)?,
                path: field(&caps, 8)?,
            });
        }
        if let Some(caps) = g.zip_file.captures(line) {
            return Some(Record::ZipFile {
                hash: field(&caps, 7)?,
                path: field(&caps, 8)?,
            });
        }
        if let Some(caps) = g.zip.captures(line) {
            return Some(Record::Zip {
                hash: field(&caps, 2)?,
                path: field(&caps, 3)?,
            });
        }
        if let Some(caps) = g.file_history.captures(line) {
            return Some(Record::FileHistory {
                version: field(&caps, 1)?.parse().ok()?,
                path: field(&caps, 2)?,
            });
        }
        if let Some(version) = Self::parse_version(line) {
            return Some(Record::Version(version));
        }
        if let Some(caps) = g.install_path_prefix.captures(line) {
            return Some(Record::InstallPathPrefix(field(&caps, 1)?));
        }
        None
    }
}
