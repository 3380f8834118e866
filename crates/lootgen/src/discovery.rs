//! Loot table file discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Find every regular `.json` file under `root`, at most `max_depth` levels
/// deep. Entries are visited in file-name order so the result is stable
/// across platforms.
pub fn find_json_files(root: &Path, max_depth: usize) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).max_depth(max_depth).sort_by_file_name() {
        let entry = entry?;
        let is_json = entry
            .path()
            .extension()
            .map(|e| e == "json")
            .unwrap_or(false);
        if entry.file_type().is_file() && is_json {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
