//! Loot table code generation.
//!
//! Decodes loot table JSON documents into a typed model ([`LootTable`]) and
//! renders the model as Java `LootTable` declarations through [`std::fmt::Display`].

pub mod collection;
pub mod decode;
pub mod error;
pub mod model;
pub mod naming;
pub mod render;

pub use collection::LootTables;
pub use decode::{decode_table, parse_table};
pub use error::DecodeError;
pub use model::{CountValue, ItemEntry, LootEntry, LootFunction, LootPool, LootTable, RollsValue};
pub use render::FloatLiteral;
