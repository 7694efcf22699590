//! Error types for component list parsing.

use thiserror::Error;

/// Result type for component list operations.
pub type ComponentResult<T> = Result<T, ComponentError>;

/// Errors that can occur while parsing component blocks and lists.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// A component block has the wrong shape or a bad field.
    ///
    /// `line` is 1-based within the block; 0 means the block as a whole.
    #[error("malformed component block (line {line}): {reason}")]
    MalformedBlock { line: usize, reason: String },

    /// The `COMPONENTS` marker or the version following it is missing.
    #[error("component list version not found")]
    VersionNotFound,

    /// The `COMPONENTS` marker appears more than once.
    #[error("duplicate COMPONENTS marker at line {line}")]
    DuplicateVersionMarker { line: usize },
}

impl ComponentError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        ComponentError::MalformedBlock {
            line,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_block_display() {
        let err = ComponentError::malformed(3, "package path must be absolute");
        let msg = err.to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("package path must be absolute"));
    }

    #[test]
    fn test_duplicate_marker_display() {
        let err = ComponentError::DuplicateVersionMarker { line: 12 };
        assert!(err.to_string().contains("12"));
    }
}
