//! Scenery `library.txt` index reading.
//!
//! X-Plane scenery packs publish objects through `library.txt` files. Each
//! `EXPORT` or `EXPORT_EXTEND` line maps a virtual library path to a file
//! inside the pack:
//!
//! ```text
//! A
//! 800
//! LIBRARY
//! EXPORT lib/airport/vehicles/fuel_truck.obj objects/fuel truck.obj
//! ```
//!
//! Lines that do not fit that shape are skipped.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, trace};

/// File name every library index must carry.
pub const LIBRARY_FILENAME: &str = "library.txt";

/// Virtual library paths mapped to real paths inside the pack.
pub type LibraryTxt = BTreeMap<String, PathBuf>;

/// Result type for library operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

/// Errors that can occur while reading library indexes.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The file is not named `library.txt`.
    #[error("not a library.txt file: {}", .0.display())]
    NotLibraryTxt(PathBuf),

    /// Failed to read a library file.
    #[error("failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scenery pack path could not be turned into a search pattern.
    #[error("invalid scenery pack path: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// Parse the text of one `library.txt`.
pub fn parse_library_txt(text: &str) -> LibraryTxt {
    let mut out = LibraryTxt::new();
    for line in text.lines() {
        let single_spaces = line
            .split(' ')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let slashes_corrected = single_spaces.replace('\\', "/");
        let mut fields = slashes_corrected.splitn(3, ' ');
        match (fields.next(), fields.next(), fields.next()) {
            (Some("EXPORT" | "EXPORT_EXTEND"), Some(lib_path), Some(real_path)) => {
                out.insert(lib_path.to_string(), PathBuf::from(real_path));
            }
            _ => trace!(line, "Skipping library.txt line"),
        }
    }
    out
}

/// Read one `library.txt` file.
pub fn read_library_txt(path: &Path) -> LibraryResult<LibraryTxt> {
    if path.file_name().and_then(|n| n.to_str()) != Some(LIBRARY_FILENAME) {
        return Err(LibraryError::NotLibraryTxt(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|e| LibraryError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    let library = parse_library_txt(&text);
    debug!(path = %path.display(), exports = library.len(), "Read library.txt");
    Ok(library)
}

/// Read several `library.txt` files into one index.
///
/// Later files override earlier ones for the same virtual path.
pub fn read_all_library_txts<I, P>(paths: I) -> LibraryResult<LibraryTxt>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths.into_iter().try_fold(LibraryTxt::new(), |mut all, path| {
        all.extend(read_library_txt(path.as_ref())?);
        Ok(all)
    })
}

/// Recursively read every `library.txt` under a scenery pack.
///
/// Files are visited in sorted path order, so deeper or later-named indexes
/// win on conflicting exports.
pub fn read_scenery_pack_library_txts(scenery_pack: &Path) -> LibraryResult<LibraryTxt> {
    let pattern = scenery_pack.join("**").join(LIBRARY_FILENAME);
    let mut paths: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())?
        .filter_map(Result::ok)
        .collect();
    paths.sort();
    debug!(pack = %scenery_pack.display(), files = paths.len(), "Found library.txt files");
    read_all_library_txts(paths)
}
