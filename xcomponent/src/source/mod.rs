//! Retrieval of component lists and manifests.
//!
//! The parsers only ever see text. This module defines the [`TextSource`]
//! seam that turns a locator into text, a filesystem implementation, and
//! loaders that pair a source with the parsers.

mod disk;
mod error;
mod loader;

pub use disk::{DiskSource, TextSource};
pub use error::{SourceError, SourceResult};
pub use loader::{
    fetch_component_list, load_component_list, load_component_list_version, load_manifest,
    load_manifest_with_next_version,
};
