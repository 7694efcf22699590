//! Error types for component manifest parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for manifest operations.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Errors that can occur while parsing a component manifest.
///
/// Every line-level variant carries the 1-based line number in the source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ManifestError {
    /// An unrecognised or structurally invalid line after the version header.
    #[error("malformed manifest line {line}: {content}")]
    MalformedManifestLine { line: usize, content: String },

    /// A loose file collides with another entry for the same path.
    #[error("duplicated raw file {} at line {line}", path.display())]
    DuplicateRawFile { line: usize, path: PathBuf },

    /// The same path appears twice inside one ZIP.
    #[error(
        "file {} must be unique within the ZIP {} (line {line})",
        path.display(),
        zip.display()
    )]
    DuplicateZipEntry {
        line: usize,
        path: PathBuf,
        zip: PathBuf,
    },

    /// A second `FILE_HISTORY` line for the same path.
    #[error("duplicate history entry for {} at line {line}", path.display())]
    DuplicateHistoryEntry { line: usize, path: PathBuf },

    /// A `ZIPFILE` line with no preceding `ZIP` line.
    #[error("ZIPFILE at line {line} is not contained in a ZIP: {content}")]
    MissingZipContext { line: usize, content: String },

    /// The `MANIFEST_VERSION` header holds a number with no successor version.
    #[error("manifest version out of range at line {line}: {content}")]
    VersionOutOfRange { line: usize, content: String },

    /// The source never declared `MANIFEST_VERSION`.
    #[error("manifest has no MANIFEST_VERSION header")]
    MissingVersion,
}

impl ManifestError {
    /// Line number the error refers to, when it refers to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ManifestError::MalformedManifestLine { line, .. }
            | ManifestError::DuplicateRawFile { line, .. }
            | ManifestError::DuplicateZipEntry { line, .. }
            | ManifestError::DuplicateHistoryEntry { line, .. }
            | ManifestError::MissingZipContext { line, .. }
            | ManifestError::VersionOutOfRange { line, .. } => Some(*line),
            ManifestError::MissingVersion => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_line_display() {
        let err = ManifestError::MalformedManifestLine {
            line: 4,
            content: "BOGUS 1 2".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 4"));
        assert!(msg.contains("BOGUS 1 2"));
    }

    #[test]
    fn test_duplicate_zip_entry_display() {
        let err = ManifestError::DuplicateZipEntry {
            line: 9,
            path: PathBuf::from("res/a.png"),
            zip: PathBuf::from("res/data.zip"),
        };
        let msg = err.to_string();
        assert!(msg.contains("res/a.png"));
        assert!(msg.contains("res/data.zip"));
    }

    #[test]
    fn test_line_accessor() {
        let err = ManifestError::DuplicateHistoryEntry {
            line: 12,
            path: PathBuf::from("a"),
        };
        assert_eq!(err.line(), Some(12));
        assert_eq!(ManifestError::MissingVersion.line(), None);
    }
}
