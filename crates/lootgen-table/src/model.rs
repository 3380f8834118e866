//! Typed loot table model (tables, pools, entries, functions).

/// Weight of an item entry whose JSON has no `weight` field.
pub const DEFAULT_WEIGHT: i32 = 0;

/// A loot table decoded from one JSON document.
#[derive(Debug, Clone, PartialEq)]
pub struct LootTable {
    /// Upper-cased constant name, e.g. `SIMPLE_DUNGEON_CHEST`.
    pub name: String,
    pub pools: Vec<LootPool>,
}

impl LootTable {
    /// Total number of entries across all pools.
    pub fn entry_count(&self) -> usize {
        self.pools.iter().map(|p| p.entries.len()).sum()
    }
}

/// A pool of loot entries rolled a number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct LootPool {
    pub rolls: RollsValue,
    /// Never empty.
    pub entries: Vec<LootEntry>,
}

/// Number of rolls — fixed or uniform range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RollsValue {
    Constant(i32),
    Uniform { min: f32, max: f32 },
}

/// A single entry in a loot pool.
#[derive(Debug, Clone, PartialEq)]
pub enum LootEntry {
    /// `minecraft:empty`: drops nothing.
    Empty { weight: i32 },
    Item(ItemEntry),
}

impl LootEntry {
    pub fn weight(&self) -> i32 {
        match self {
            LootEntry::Empty { weight } => *weight,
            LootEntry::Item(item) => item.weight,
        }
    }
}

/// An entry that drops an item, optionally modified by functions.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemEntry {
    /// Namespaced identifier, e.g. `minecraft:iron_ingot`.
    pub name: String,
    /// [`DEFAULT_WEIGHT`] when the source had none; omitted from output.
    pub weight: i32,
    pub functions: Vec<LootFunction>,
}

impl ItemEntry {
    pub fn has_function(&self, function: &LootFunction) -> bool {
        self.functions.contains(function)
    }
}

/// A function that modifies the dropped item.
///
/// Only `set_count` carries data. The other kinds are recognized so they can be
/// detected and rendered as placeholders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LootFunction {
    SetCount(CountValue),
    EnchantRandomly,
    EnchantWithLevels,
    ExplorationMap,
    SetStewEffect,
    SetDamage,
}

impl LootFunction {
    /// Function name without namespace, e.g. `set_count`.
    pub fn kind(&self) -> &'static str {
        match self {
            LootFunction::SetCount(_) => "set_count",
            LootFunction::EnchantRandomly => "enchant_randomly",
            LootFunction::EnchantWithLevels => "enchant_with_levels",
            LootFunction::ExplorationMap => "exploration_map",
            LootFunction::SetStewEffect => "set_stew_effect",
            LootFunction::SetDamage => "set_damage",
        }
    }

    /// Look up a payload-free function by its unqualified kind.
    pub fn marker(kind: &str) -> Option<Self> {
        match kind {
            "enchant_randomly" => Some(LootFunction::EnchantRandomly),
            "enchant_with_levels" => Some(LootFunction::EnchantWithLevels),
            "exploration_map" => Some(LootFunction::ExplorationMap),
            "set_stew_effect" => Some(LootFunction::SetStewEffect),
            "set_damage" => Some(LootFunction::SetDamage),
            _ => None,
        }
    }
}

/// Count value of `set_count` — fixed or uniform range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CountValue {
    Constant(i32),
    Uniform { min: f32, max: f32 },
}
