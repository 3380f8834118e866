//! Ordered collection of loot tables rendered into one source blob.

use std::fmt;

use crate::model::LootTable;

/// Separator between rendered tables: one blank line.
pub const TABLE_SEPARATOR: &str = "\n\n";

/// Loot tables in discovery order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LootTables {
    tables: Vec<LootTable>,
}

impl LootTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, table: LootTable) {
        self.tables.push(table);
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LootTable> {
        self.tables.iter()
    }

    /// Render every table, separated by a blank line.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LootTables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, table) in self.tables.iter().enumerate() {
            if i > 0 {
                f.write_str(TABLE_SEPARATOR)?;
            }
            write!(f, "{table}")?;
        }
        Ok(())
    }
}

impl FromIterator<LootTable> for LootTables {
    fn from_iter<I: IntoIterator<Item = LootTable>>(iter: I) -> Self {
        Self {
            tables: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a LootTables {
    type Item = &'a LootTable;
    type IntoIter = std::slice::Iter<'a, LootTable>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}
