//! Atomic output file writing.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Write `contents` to `path` through a sibling temp file and a rename, so
/// the destination is either left untouched or fully written.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let temp_path = temp_path(path);
    fs::write(&temp_path, contents)?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// `<path>.tmp`, e.g. `loot_tables_output.txt.tmp`.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
