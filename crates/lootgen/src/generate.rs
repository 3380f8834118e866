//! Generation pipeline: discover, decode, render, write.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lootgen_table::{naming, DecodeError, LootTable, LootTables};
use thiserror::Error;
use tracing::debug;

use crate::config::{GeneratorConfig, SourceSection};
use crate::discovery;
use crate::output;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("loot table directory not found: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("failed to scan {}: {source}", root.display())]
    Scan {
        root: PathBuf,
        source: walkdir::Error,
    },

    #[error("no loot table JSON files under {}", .0.display())]
    NoTables(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to decode {}: {source}", path.display())]
    Decode { path: PathBuf, source: DecodeError },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub tables: usize,
    pub pools: usize,
    pub entries: usize,
    pub output: PathBuf,
}

/// Run the whole generation. Nothing is written unless every document
/// decodes.
pub fn generate(config: &GeneratorConfig) -> Result<Summary, GenerateError> {
    let tables = collect_tables(&config.source)?;

    let mut rendered = tables.render();
    rendered.push('\n');

    let path = &config.output.path;
    output::write_atomic(path, &rendered).map_err(|source| GenerateError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(Summary {
        tables: tables.len(),
        pools: tables.iter().map(|t| t.pools.len()).sum(),
        entries: tables.iter().map(LootTable::entry_count).sum(),
        output: path.clone(),
    })
}

/// Decode every loot table under the source directory, in discovery order.
pub fn collect_tables(source: &SourceSection) -> Result<LootTables, GenerateError> {
    let root = &source.directory;
    if !root.is_dir() {
        return Err(GenerateError::MissingSource(root.clone()));
    }

    let files = discovery::find_json_files(root, source.max_depth).map_err(|e| {
        GenerateError::Scan {
            root: root.clone(),
            source: e,
        }
    })?;
    if files.is_empty() {
        return Err(GenerateError::NoTables(root.clone()));
    }
    debug!("Found {} loot table files under {}", files.len(), root.display());

    files
        .iter()
        .map(|path| load_table(path, &source.table_suffix))
        .collect()
}

fn load_table(path: &Path, suffix: &str) -> Result<LootTable, GenerateError> {
    let json = fs::read_to_string(path).map_err(|source| GenerateError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    let name = naming::table_name(&file_name, suffix);

    let table = lootgen_table::parse_table(name, &json).map_err(|source| GenerateError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        "Decoded {} from {} ({} pools, {} entries)",
        table.name,
        path.display(),
        table.pools.len(),
        table.entry_count()
    );
    Ok(table)
}
