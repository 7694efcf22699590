//! Scenery library index CLI command.

use std::path::Path;

use xcomponent::library::read_scenery_pack_library_txts;

use crate::error::CliError;

/// Print the merged `library.txt` exports of a scenery pack.
pub fn run(scenery_pack: &Path) -> Result<(), CliError> {
    let library = read_scenery_pack_library_txts(scenery_pack)?;

    if library.is_empty() {
        println!("No library exports found under {}", scenery_pack.display());
        return Ok(());
    }

    for (lib_path, real_path) in &library {
        println!("{} -> {}", lib_path, real_path.display());
    }
    println!("{} exports", library.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_run_on_pack() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("library.txt"),
            "A\n800\nLIBRARY\nEXPORT lib/x.obj objects/x.obj\n",
        )
        .unwrap();
        assert!(run(temp.path()).is_ok());
    }

    #[test]
    fn test_run_on_empty_pack() {
        let temp = TempDir::new().unwrap();
        assert!(run(temp.path()).is_ok());
    }
}
