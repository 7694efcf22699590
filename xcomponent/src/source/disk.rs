//! Text sources: the retrieval seam between locators and parsers.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{SourceError, SourceResult};

/// Something that can turn a locator into UTF-8 text.
///
/// Locators are opaque to the parsers: a path on disk, a URL, or a key into
/// an in-memory table, depending on the implementation.
pub trait TextSource {
    /// Fetch the complete document named by `locator`.
    fn fetch(&self, locator: &str) -> SourceResult<String>;
}

impl<T: TextSource + ?Sized> TextSource for &T {
    fn fetch(&self, locator: &str) -> SourceResult<String> {
        (**self).fetch(locator)
    }
}

/// Reads documents from the local filesystem.
///
/// Relative locators are resolved against an optional base directory.
/// Locators with a URL scheme (`http://`, `https://`) are rejected with
/// [`SourceError::Unsupported`].
#[derive(Debug, Clone, Default)]
pub struct DiskSource {
    base_dir: Option<PathBuf>,
}

impl DiskSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative locators against `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    fn resolve(&self, locator: &str) -> PathBuf {
        let path = Path::new(locator);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl TextSource for DiskSource {
    fn fetch(&self, locator: &str) -> SourceResult<String> {
        if is_url(locator) {
            return Err(SourceError::Unsupported(locator.to_string()));
        }
        let path = self.resolve(locator);
        debug!(path = %path.display(), "Reading document from disk");
        fs::read_to_string(&path).map_err(|e| SourceError::ReadFailed {
            locator: locator.to_string(),
            source: e,
        })
    }
}

fn is_url(locator: &str) -> bool {
    locator.starts_with("http://") || locator.starts_with("https://")
}
