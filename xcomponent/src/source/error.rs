//! Error types for text sources and loaders.

use std::io;

use thiserror::Error;

use crate::component::ComponentError;
use crate::manifest::ManifestError;

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors that can occur while fetching and parsing a document.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The locator could not be read.
    #[error("failed to read {locator}: {source}")]
    ReadFailed {
        locator: String,
        #[source]
        source: io::Error,
    },

    /// The locator names a scheme this source cannot serve.
    #[error("unsupported locator: {0}")]
    Unsupported(String),

    /// The component list could not be parsed.
    #[error(transparent)]
    Component(#[from] ComponentError),

    /// The manifest could not be parsed.
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

impl SourceError {
    /// Whether the error happened while retrieving text, as opposed to
    /// parsing it.
    pub fn is_retrieval(&self) -> bool {
        matches!(
            self,
            SourceError::ReadFailed { .. } | SourceError::Unsupported(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_read_failed_display_and_source() {
        let err = SourceError::ReadFailed {
            locator: "/tmp/component_list.txt".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "file not found"),
        };
        assert!(err.to_string().contains("/tmp/component_list.txt"));
        assert!(err.source().is_some());
        assert!(err.is_retrieval());
    }

    #[test]
    fn test_parse_errors_are_not_retrieval() {
        let err = SourceError::from(ManifestError::MissingVersion);
        assert!(!err.is_retrieval());
        assert_eq!(err.to_string(), ManifestError::MissingVersion.to_string());
    }
}
