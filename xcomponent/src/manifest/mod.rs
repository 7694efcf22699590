//! Component manifest (`directory.txt`) model and parser.
//!
//! A component manifest lists every file a component installs, with the hash
//! of its content and whether it ships loose (`RAWFILE`) or inside a ZIP
//! archive (`ZIP` followed by its `ZIPFILE` members). `FILE_HISTORY` lines
//! record the last manifest version that touched each path, including
//! deleted ones.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use xcomponent::manifest::ComponentManifest;
//!
//! let text = "\
//! MANIFEST_VERSION 3
//! INSTALL_PATH_PREFIX Resources
//! ZIP 1.0 abc data.zip data.zip
//! ZIPFILE 0 0 0 0 tok 2.0 f00d foo/bar.png
//! FILE_HISTORY 2 foo/bar.png
//! ";
//!
//! let (manifest, next_version) = ComponentManifest::parse_with_next_version(Some(text)).unwrap();
//! let manifest = manifest.unwrap();
//! assert_eq!(next_version, 4);
//!
//! let entries = manifest.entries_for("Resources/foo/bar.png");
//! assert_eq!(entries[0].hash, "f00d");
//! assert_eq!(entries[0].in_zip(), Some(Path::new("Resources/data.zip")));
//! assert_eq!(manifest.last_touched("foo/bar.png"), Some(2));
//! ```

mod entry;
mod error;
mod escape;
mod model;
mod parser;
mod record;

pub use entry::{Container, ManifestEntry, ManifestHistory};
pub use error::{ManifestError, ManifestResult};
pub use escape::unescape_spaces;
pub use model::{next_version_after, ComponentManifest, FIRST_MANIFEST_VERSION};
