//! Component manifest CLI command.

use std::fmt::Write as _;

use xcomponent::manifest::{ComponentManifest, Container};
use xcomponent::source::{load_manifest_with_next_version, TextSource};

use crate::error::CliError;

/// What to print besides the summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestOutput {
    pub entries: bool,
    pub history: bool,
}

/// Summarise a manifest and the version its successor should carry.
///
/// Without a locator the component is treated as having no prior manifest.
pub fn run<S: TextSource>(
    source: &S,
    locator: Option<&str>,
    output: ManifestOutput,
) -> Result<(), CliError> {
    let (manifest, next_version) = load_manifest_with_next_version(source, locator)?;
    match &manifest {
        Some(manifest) => print!("{}", format_manifest(manifest, output)),
        None => println!("No prior manifest"),
    }
    println!("Next version: {}", next_version);
    Ok(())
}

fn format_manifest(manifest: &ComponentManifest, output: ManifestOutput) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Manifest version: {}", manifest.version());
    let _ = writeln!(
        out,
        "Install prefix:   {}",
        manifest.install_path_prefix().display()
    );
    let _ = writeln!(out, "Paths:            {}", manifest.path_count());
    let _ = writeln!(out, "Loose files:      {}", manifest.raw_files().count());
    let _ = writeln!(out, "ZIP archives:     {}", manifest.zip_hashes().len());
    let _ = writeln!(out, "History entries:  {}", manifest.history().len());

    if output.entries {
        let _ = writeln!(out);
        let _ = writeln!(out, "Entries:");
        for (path, entry) in manifest.all_paths_all_entries() {
            match &entry.container {
                Container::Raw => {
                    let _ = writeln!(out, "  {}  {}", entry.hash, path.display());
                }
                Container::Zip(zip) => {
                    let _ = writeln!(
                        out,
                        "  {}  {}  (in {})",
                        entry.hash,
                        path.display(),
                        zip.display()
                    );
                }
            }
        }
    }

    if output.history {
        let _ = writeln!(out);
        let _ = writeln!(out, "History:");
        for (path, history) in manifest.history() {
            let _ = writeln!(out, "  {:>5}  {}", history.version, path.display());
        }
    }

    out
}
