//! Manifest entry types.

use std::path::{Path, PathBuf};

/// Where the content of a manifest entry lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Container {
    /// A loose file on disk (`RAWFILE`).
    Raw,
    /// A member of the ZIP archive at this absolute path (`ZIPFILE`).
    Zip(PathBuf),
}

impl Container {
    /// The containing ZIP, if any.
    pub fn zip(&self) -> Option<&Path> {
        match self {
            Container::Raw => None,
            Container::Zip(path) => Some(path),
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Container::Raw)
    }
}

/// One occurrence of an on-disk path in a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Content hash as written by the manifest producer.
    pub hash: String,

    /// Loose file or ZIP member.
    pub container: Container,
}

impl ManifestEntry {
    /// Entry for a loose file.
    pub fn raw(hash: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            container: Container::Raw,
        }
    }

    /// Entry for a file packed in `zip`.
    pub fn zipped(hash: impl Into<String>, zip: impl Into<PathBuf>) -> Self {
        Self {
            hash: hash.into(),
            container: Container::Zip(zip.into()),
        }
    }

    /// The containing ZIP, if any.
    pub fn in_zip(&self) -> Option<&Path> {
        self.container.zip()
    }
}

/// Most recent manifest version that created, modified or deleted a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ManifestHistory {
    pub version: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_entry() {
        let entry = ManifestEntry::raw("abc");
        assert_eq!(entry.hash, "abc");
        assert!(entry.container.is_raw());
        assert_eq!(entry.in_zip(), None);
    }

    #[test]
    fn test_zipped_entry() {
        let entry = ManifestEntry::zipped("def", "/res/data.zip");
        assert!(!entry.container.is_raw());
        assert_eq!(entry.in_zip(), Some(Path::new("/res/data.zip")));
    }
}
