use serde::Deserialize;
use std::path::{Path, PathBuf};

use lootgen_table::naming::DEFAULT_TABLE_SUFFIX;

/// Config file read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "lootgen.toml";

#[derive(Debug, Default, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub source: SourceSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Deserialize)]
pub struct SourceSection {
    /// Directory scanned for loot table JSON files.
    #[serde(default = "default_source_directory")]
    pub directory: PathBuf,
    /// Maximum directory depth below `directory`. Default: 3.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Appended to each file stem to form the table name.
    #[serde(default = "default_table_suffix")]
    pub table_suffix: String,
}

fn default_source_directory() -> PathBuf {
    PathBuf::from("src/main/resources/loot/v1_16")
}

fn default_max_depth() -> usize {
    3
}

fn default_table_suffix() -> String {
    DEFAULT_TABLE_SUFFIX.into()
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            directory: default_source_directory(),
            max_depth: default_max_depth(),
            table_suffix: default_table_suffix(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OutputSection {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("loot_tables_output.txt")
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl GeneratorConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load `explicit` if given, else `fallback` if it exists, else the
    /// built-in defaults. `main` passes [`DEFAULT_CONFIG_PATH`] as `fallback`.
    pub fn load_or_default(
        explicit: Option<&Path>,
        fallback: &Path,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        match explicit {
            Some(path) => Self::load(path),
            None if fallback.is_file() => Self::load(fallback),
            None => Ok(Self::default()),
        }
    }
}
