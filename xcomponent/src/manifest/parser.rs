//! Single-pass manifest parser.
//!
//! The parse is a fold over the source lines. [`ParseState`] carries
//! everything learnt so far; each line is classified into a [`Record`] and
//! applied to the state, which either advances or fails the whole parse.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::entry::{ManifestEntry, ManifestHistory};
use super::error::{ManifestError, ManifestResult};
use super::escape::unescape_spaces;
use super::model::ComponentManifest;
use super::record::Record;

/// Accumulator threaded through the lines of one manifest.
#[derive(Debug, Default)]
struct ParseState {
    /// `None` until the `MANIFEST_VERSION` header is seen.
    version: Option<u32>,
    /// `None` until the first `INSTALL_PATH_PREFIX` line.
    install_path_prefix: Option<PathBuf>,
    entries: BTreeMap<PathBuf, Vec<ManifestEntry>>,
    zip_hashes: BTreeMap<PathBuf, String>,
    history: BTreeMap<PathBuf, ManifestHistory>,
    /// ZIP that subsequent `ZIPFILE` lines belong to.
    current_zip: Option<PathBuf>,
}

impl ParseState {
    fn prefix(&self) -> &Path {
        self.install_path_prefix
            .as_deref()
            .unwrap_or_else(|| Path::new(""))
    }

    fn absolute(&self, escaped: &str) -> PathBuf {
        self.prefix().join(&*unescape_spaces(escaped))
    }

    fn is_raw_file(&self, path: &Path) -> bool {
        self.entries
            .get(path)
            .is_some_and(|entries| entries.iter().any(|e| e.container.is_raw()))
    }

    /// Apply one source line. `line_no` is 1-based.
    fn apply(mut self, line_no: usize, line: &str) -> ManifestResult<Self> {
        if self.version.is_none() {
            // Everything before the header is ignored.
            if Record::version_digits(line).is_some() {
                let version = Record::parse_version(line).ok_or_else(|| {
                    ManifestError::VersionOutOfRange {
                        line: line_no,
                        content: line.to_string(),
                    }
                })?;
                debug!(version, line = line_no, "Found manifest version");
                self.version = Some(version);
            }
            return Ok(self);
        }

        if line.trim().is_empty() {
            return Ok(self);
        }

        let record = Record::parse(line).ok_or_else(|| ManifestError::MalformedManifestLine {
            line: line_no,
            content: line.to_string(),
        })?;
        trace!(line = line_no, ?record, "Manifest record");

        match record {
            Record::Version(version) => {
                debug!(version, line = line_no, "Ignoring repeated MANIFEST_VERSION");
            }
            Record::InstallPathPrefix(prefix) => {
                if self.install_path_prefix.is_none() {
                    self.install_path_prefix = Some(PathBuf::from(&*unescape_spaces(prefix)));
                }
            }
            Record::RawFile { hash, path } => {
                let path = self.absolute(path);
                if self.entries.contains_key(&path) || self.zip_hashes.contains_key(&path) {
                    return Err(ManifestError::DuplicateRawFile {
                        line: line_no,
                        path,
                    });
                }
                self.entries
                    .entry(path)
                    .or_default()
                    .push(ManifestEntry::raw(hash));
            }
            Record::Zip { hash, path } => {
                let zip = self.absolute(path);
                if self.is_raw_file(&zip) {
                    return Err(ManifestError::DuplicateRawFile {
                        line: line_no,
                        path: zip,
                    });
                }
                self.zip_hashes.insert(zip.clone(), hash.to_string());
                self.current_zip = Some(zip);
            }
            Record::ZipFile { hash, path } => {
                let zip = self
                    .current_zip
                    .clone()
                    .ok_or_else(|| ManifestError::MissingZipContext {
                        line: line_no,
                        content: line.to_string(),
                    })?;
                let path = self.absolute(path);
                // A path is either loose or zipped, never both.
                if self.is_raw_file(&path) {
                    return Err(ManifestError::DuplicateRawFile {
                        line: line_no,
                        path,
                    });
                }
                if let Some(existing) = self.entries.get(&path) {
                    if existing.iter().any(|e| e.in_zip() == Some(zip.as_path())) {
                        return Err(ManifestError::DuplicateZipEntry {
                            line: line_no,
                            path,
                            zip,
                        });
                    }
                }
                self.entries
                    .entry(path)
                    .or_default()
                    .push(ManifestEntry::zipped(hash, zip));
            }
            Record::FileHistory { version, path } => {
                let path = PathBuf::from(path);
                if self.history.contains_key(&path) {
                    return Err(ManifestError::DuplicateHistoryEntry {
                        line: line_no,
                        path,
                    });
                }
                self.history.insert(path, ManifestHistory { version });
            }
        }

        Ok(self)
    }

    fn finish(self) -> ManifestResult<ComponentManifest> {
        let version = self.version.ok_or(ManifestError::MissingVersion)?;
        Ok(ComponentManifest::from_parts(
            version,
            self.install_path_prefix.unwrap_or_default(),
            self.entries,
            self.zip_hashes,
            self.history,
        ))
    }
}

/// Parse a complete manifest body.
pub(crate) fn parse_manifest(text: &str) -> ManifestResult<ComponentManifest> {
    let state = text
        .lines()
        .enumerate()
        .try_fold(ParseState::default(), |state, (index, line)| {
            state.apply(index + 1, line)
        })?;
    let manifest = state.finish()?;
    debug!(
        version = manifest.version(),
        paths = manifest.path_count(),
        zips = manifest.zip_hashes().len(),
        history = manifest.history().len(),
        "Parsed component manifest"
    );
    Ok(manifest)
}
