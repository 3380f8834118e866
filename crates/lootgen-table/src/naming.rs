//! Identifier conventions shared by the decoder and the renderer.

/// Namespace prefix of vanilla identifiers.
pub const NAMESPACE: &str = "minecraft:";

/// Entry type that selects an empty entry.
pub const EMPTY_ENTRY: &str = "minecraft:empty";

/// Count distribution type for uniform `set_count` ranges.
pub const UNIFORM: &str = "minecraft:uniform";

pub const BOOK: &str = "minecraft:book";
pub const ENCHANTED_BOOK: &str = "minecraft:enchanted_book";

/// Suffix appended to table names derived from file names.
pub const DEFAULT_TABLE_SUFFIX: &str = "_CHEST";

/// Derive a table constant name from a loot table file name.
///
/// The `.json` extension is replaced by `suffix` and the result upper-cased,
/// so `small.json` becomes `SMALL_CHEST` with the default suffix.
pub fn table_name(file_name: &str, suffix: &str) -> String {
    let stem = file_name.strip_suffix(".json").unwrap_or(file_name);
    format!("{stem}{suffix}").to_uppercase()
}

/// Map a namespaced item identifier to its `Item` constant name.
///
/// `minecraft:golden_apple` becomes `GOLDEN_APPLE`. Identifiers without the
/// namespace are upper-cased as they are.
pub fn item_constant(name: &str) -> String {
    name.strip_prefix(NAMESPACE).unwrap_or(name).to_uppercase()
}
