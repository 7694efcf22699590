//! The parsed component manifest.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::entry::{ManifestEntry, ManifestHistory};
use super::error::ManifestResult;
use super::parser::parse_manifest;

/// Version assigned to the first manifest of a component.
pub const FIRST_MANIFEST_VERSION: u32 = 1;

/// A component's `directory.txt` manifest: current file hashes plus history.
///
/// Built once by parsing and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentManifest {
    version: u32,
    install_path_prefix: PathBuf,
    /// One on-disk path may be packed in several ZIPs at once.
    entries: BTreeMap<PathBuf, Vec<ManifestEntry>>,
    zip_hashes: BTreeMap<PathBuf, String>,
    history: BTreeMap<PathBuf, ManifestHistory>,
}

impl ComponentManifest {
    pub(crate) fn from_parts(
        version: u32,
        install_path_prefix: PathBuf,
        entries: BTreeMap<PathBuf, Vec<ManifestEntry>>,
        zip_hashes: BTreeMap<PathBuf, String>,
        history: BTreeMap<PathBuf, ManifestHistory>,
    ) -> Self {
        Self {
            version,
            install_path_prefix,
            entries,
            zip_hashes,
            history,
        }
    }

    /// Parse manifest text.
    ///
    /// `None`, or text that is empty or only whitespace, means no manifest
    /// existed yet (for example a component's first release) and yields
    /// `Ok(None)`. Any malformed line fails the whole parse.
    ///
    /// # Example
    ///
    /// ```
    /// use xcomponent::manifest::ComponentManifest;
    ///
    /// let text = "MANIFEST_VERSION 7\nRAWFILE 0 0 10 0 t 1.0 abc a.png a.png\n";
    /// let manifest = ComponentManifest::parse(Some(text)).unwrap().unwrap();
    /// assert_eq!(manifest.version(), 7);
    /// assert_eq!(manifest.next_version(), 8);
    ///
    /// assert!(ComponentManifest::parse(None).unwrap().is_none());
    /// ```
    pub fn parse(source: Option<&str>) -> ManifestResult<Option<Self>> {
        match source.filter(|text| !text.trim().is_empty()) {
            Some(text) => parse_manifest(text).map(Some),
            None => {
                debug!("No prior manifest");
                Ok(None)
            }
        }
    }

    /// Parse manifest text and compute the version its successor should use.
    pub fn parse_with_next_version(source: Option<&str>) -> ManifestResult<(Option<Self>, u32)> {
        let manifest = Self::parse(source)?;
        let next_version = next_version_after(manifest.as_ref());
        Ok((manifest, next_version))
    }

    /// The manifest's own version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Version the next manifest of this component should carry.
    ///
    /// Parsing rejects a version without a successor, so this cannot overflow.
    pub fn next_version(&self) -> u32 {
        self.version + 1
    }

    /// Prefix prepended to every relative path in the manifest.
    pub fn install_path_prefix(&self) -> &Path {
        &self.install_path_prefix
    }

    /// All on-disk paths with their entries.
    pub fn entries(&self) -> &BTreeMap<PathBuf, Vec<ManifestEntry>> {
        &self.entries
    }

    /// Entries recorded for one on-disk path.
    pub fn entries_for(&self, path: impl AsRef<Path>) -> &[ManifestEntry] {
        self.entries
            .get(path.as_ref())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the manifest lists `path` at all.
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.entries.contains_key(path.as_ref())
    }

    /// Number of distinct on-disk paths.
    pub fn path_count(&self) -> usize {
        self.entries.len()
    }

    /// ZIP archive paths and their hashes.
    pub fn zip_hashes(&self) -> &BTreeMap<PathBuf, String> {
        &self.zip_hashes
    }

    /// Per-path history, keyed by the path exactly as written in the manifest.
    pub fn history(&self) -> &BTreeMap<PathBuf, ManifestHistory> {
        &self.history
    }

    /// Most recent manifest version that touched `path`.
    pub fn last_touched(&self, path: impl AsRef<Path>) -> Option<u32> {
        self.history.get(path.as_ref()).map(|h| h.version)
    }

    /// Flatten the entries into `(path, entry)` pairs, one per occurrence.
    pub fn all_paths_all_entries(&self) -> impl Iterator<Item = (&Path, &ManifestEntry)> {
        self.entries
            .iter()
            .flat_map(|(path, entries)| entries.iter().map(move |e| (path.as_path(), e)))
    }

    /// Loose files and their hashes.
    pub fn raw_files(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.all_paths_all_entries()
            .filter(|(_, e)| e.container.is_raw())
            .map(|(path, e)| (path, e.hash.as_str()))
    }

    /// Members of one ZIP and their hashes.
    pub fn zip_members<'a>(
        &'a self,
        zip: &'a Path,
    ) -> impl Iterator<Item = (&'a Path, &'a str)> + 'a {
        self.all_paths_all_entries()
            .filter(move |(_, e)| e.in_zip() == Some(zip))
            .map(|(path, e)| (path, e.hash.as_str()))
    }
}

/// Version for the manifest following `previous`, or
/// [`FIRST_MANIFEST_VERSION`] when there was none.
pub fn next_version_after(previous: Option<&ComponentManifest>) -> u32 {
    previous.map_or(FIRST_MANIFEST_VERSION, ComponentManifest::next_version)
}
