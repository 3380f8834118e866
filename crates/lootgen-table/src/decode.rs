//! Loot table decoding from generic JSON trees.
//!
//! Variants are selected two ways:
//! - by shape for rolls and `set_count` counts (a number is a constant, an
//!   object is a range);
//! - by tag for entries (`type`) and functions (`function`).
//!
//! Absent optional fields take their default. A field that is present with
//! the wrong type is always an error.

use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::model::{
    CountValue, ItemEntry, LootEntry, LootFunction, LootPool, LootTable, RollsValue,
    DEFAULT_WEIGHT,
};
use crate::naming::{BOOK, EMPTY_ENTRY, ENCHANTED_BOOK, NAMESPACE, UNIFORM};

type Object = Map<String, Value>;
type Result<T> = std::result::Result<T, DecodeError>;

/// Path of the document root in error messages.
pub const ROOT: &str = "$";

/// Parse a loot table from a JSON string.
pub fn parse_table(name: impl Into<String>, json: &str) -> Result<LootTable> {
    let value: Value = serde_json::from_str(json)?;
    decode_table(name, &value)
}

/// Decode a loot table document. `name` is upper-cased.
pub fn decode_table(name: impl Into<String>, value: &Value) -> Result<LootTable> {
    let table = as_object(value, ROOT)?;
    let pools = required(table, ROOT, "pools", |v, path| {
        decode_array(v, path, decode_pool)
    })?;
    Ok(LootTable {
        name: name.into().to_uppercase(),
        pools,
    })
}

pub fn decode_pool(value: &Value, path: &str) -> Result<LootPool> {
    let pool = as_object(value, path)?;
    let rolls = required(pool, path, "rolls", decode_rolls)?;
    let entries = required(pool, path, "entries", |v, path| {
        decode_array(v, path, decode_entry)
    })?;
    if entries.is_empty() {
        return Err(DecodeError::EmptyPool {
            path: field_path(path, "entries"),
        });
    }
    Ok(LootPool { rolls, entries })
}

/// Decode the value of a pool's `rolls` field.
pub fn decode_rolls(value: &Value, path: &str) -> Result<RollsValue> {
    match value {
        Value::Number(_) => as_int(value, path).map(RollsValue::Constant),
        Value::Object(range) => Ok(RollsValue::Uniform {
            min: required(range, path, "min", as_float)?,
            max: required(range, path, "max", as_float)?,
        }),
        other => Err(wrong_type(path, "integer or range object", other)),
    }
}

pub fn decode_entry(value: &Value, path: &str) -> Result<LootEntry> {
    let entry = as_object(value, path)?;
    let entry_type = required(entry, path, "type", as_str)?;

    if entry_type == EMPTY_ENTRY {
        let weight = required(entry, path, "weight", as_int)?;
        return Ok(LootEntry::Empty { weight });
    }

    let mut item = ItemEntry {
        name: required(entry, path, "name", as_str)?.to_string(),
        weight: optional(entry, path, "weight", DEFAULT_WEIGHT, as_int)?,
        functions: optional(entry, path, "functions", Vec::new(), |v, path| {
            decode_array(v, path, decode_function)
        })?,
    };

    // A plain book rolled with enchant_randomly always comes out enchanted.
    if item.name == BOOK && item.has_function(&LootFunction::EnchantRandomly) {
        item.name = ENCHANTED_BOOK.to_string();
    }

    Ok(LootEntry::Item(item))
}

pub fn decode_function(value: &Value, path: &str) -> Result<LootFunction> {
    let function = as_object(value, path)?;
    let tag = required(function, path, "function", as_str)?;

    match tag.strip_prefix(NAMESPACE) {
        Some("set_count") => {
            required(function, path, "count", decode_count).map(LootFunction::SetCount)
        }
        kind => kind
            .and_then(LootFunction::marker)
            .ok_or_else(|| DecodeError::UnsupportedFunction {
                path: path.to_string(),
                tag: tag.to_string(),
            }),
    }
}

/// Decode the value of a `set_count` function's `count` field.
pub fn decode_count(value: &Value, path: &str) -> Result<CountValue> {
    match value {
        Value::Number(_) => as_int(value, path).map(CountValue::Constant),
        Value::Object(distribution) => {
            let kind = required(distribution, path, "type", as_str)?;
            if kind != UNIFORM {
                return Err(DecodeError::UnsupportedCount {
                    path: path.to_string(),
                    tag: kind.to_string(),
                });
            }
            Ok(CountValue::Uniform {
                min: required(distribution, path, "min", as_float)?,
                max: required(distribution, path, "max", as_float)?,
            })
        }
        other => Err(wrong_type(path, "integer or distribution object", other)),
    }
}

// ─── Field accessors ────────────────────────────────────────────────────────

/// Read a field that must be present. `null` counts as absent.
fn required<'a, T>(
    object: &'a Object,
    path: &str,
    field: &'static str,
    read: impl FnOnce(&'a Value, &str) -> Result<T>,
) -> Result<T> {
    match object.get(field) {
        None | Some(Value::Null) => Err(DecodeError::MissingField {
            path: path.to_string(),
            field,
        }),
        Some(value) => read(value, &field_path(path, field)),
    }
}

/// Read a field, falling back to `default` when it is absent.
fn optional<'a, T>(
    object: &'a Object,
    path: &str,
    field: &str,
    default: T,
    read: impl FnOnce(&'a Value, &str) -> Result<T>,
) -> Result<T> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => read(value, &field_path(path, field)),
    }
}

/// Decode every element of a JSON array in order.
fn decode_array<T>(
    value: &Value,
    path: &str,
    decode: impl Fn(&Value, &str) -> Result<T>,
) -> Result<Vec<T>> {
    let items = value
        .as_array()
        .ok_or_else(|| wrong_type(path, "array", value))?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| decode(item, &format!("{path}[{i}]")))
        .collect()
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Object> {
    value
        .as_object()
        .ok_or_else(|| wrong_type(path, "object", value))
}

fn as_str<'a>(value: &'a Value, path: &str) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| wrong_type(path, "string", value))
}

/// Integral numbers only; `3.0` is accepted, `3.5` is not.
fn as_int(value: &Value, path: &str) -> Result<i32> {
    let Value::Number(number) = value else {
        return Err(wrong_type(path, "integer", value));
    };
    let out_of_range = || DecodeError::IntegerOutOfRange {
        path: path.to_string(),
        value: number.to_string(),
    };
    if let Some(n) = number.as_i64() {
        return i32::try_from(n).map_err(|_| out_of_range());
    }
    if number.is_u64() {
        return Err(out_of_range());
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 => {
            if f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX) {
                Ok(f as i32)
            } else {
                Err(out_of_range())
            }
        }
        _ => Err(wrong_type(path, "integer", value)),
    }
}

/// Bounds are single precision.
fn as_float(value: &Value, path: &str) -> Result<f32> {
    value
        .as_f64()
        .map(|f| f as f32)
        .ok_or_else(|| wrong_type(path, "number", value))
}

fn field_path(path: &str, field: &str) -> String {
    format!("{path}.{field}")
}

fn wrong_type(path: &str, expected: &'static str, got: &Value) -> DecodeError {
    DecodeError::WrongType {
        path: path.to_string(),
        expected,
        got: json_kind(got),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(value: Value) -> LootEntry {
        decode_entry(&value, ROOT).unwrap()
    }

    fn item(value: Value) -> ItemEntry {
        match entry(value) {
            LootEntry::Item(item) => item,
            other => panic!("expected item entry, got {other:?}"),
        }
    }

    #[test]
    fn parse_small_table() {
        let json = r#"{"pools":[{"rolls":1,"entries":[{"type":"minecraft:empty","weight":5}]}]}"#;
        let table = parse_table("SMALL_CHEST", json).unwrap();
        assert_eq!(table.name, "SMALL_CHEST");
        assert_eq!(table.pools.len(), 1);
        assert_eq!(table.pools[0].rolls, RollsValue::Constant(1));
        assert_eq!(table.pools[0].entries, vec![LootEntry::Empty { weight: 5 }]);
    }

    #[test]
    fn table_name_is_upper_cased() {
        let table = decode_table("small_chest", &json!({ "pools": [] })).unwrap();
        assert_eq!(table.name, "SMALL_CHEST");
        assert!(table.pools.is_empty());
    }

    #[test]
    fn integer_rolls_are_constant() {
        for n in [0, 1, 3, 42] {
            assert_eq!(decode_rolls(&json!(n), ROOT).unwrap(), RollsValue::Constant(n));
        }
    }

    #[test]
    fn object_rolls_are_uniform() {
        let rolls = decode_rolls(&json!({ "min": 2.0, "max": 4.5 }), ROOT).unwrap();
        assert_eq!(rolls, RollsValue::Uniform { min: 2.0, max: 4.5 });

        // Integral bounds and an explicit type are accepted as well.
        let rolls = decode_rolls(
            &json!({ "type": "minecraft:uniform", "min": 1, "max": 3 }),
            ROOT,
        )
        .unwrap();
        assert_eq!(rolls, RollsValue::Uniform { min: 1.0, max: 3.0 });
    }

    #[test]
    fn uniform_rolls_require_bounds() {
        let err = decode_rolls(&json!({ "min": 1.0 }), "$.pools[0].rolls").unwrap_err();
        match err {
            DecodeError::MissingField { path, field } => {
                assert_eq!(path, "$.pools[0].rolls");
                assert_eq!(field, "max");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rolls_of_wrong_shape_fail() {
        assert!(matches!(
            decode_rolls(&json!("three"), ROOT),
            Err(DecodeError::WrongType { .. })
        ));
        assert!(matches!(
            decode_rolls(&json!(1.5), ROOT),
            Err(DecodeError::WrongType { .. })
        ));
    }

    #[test]
    fn empty_entry_requires_weight() {
        assert_eq!(
            entry(json!({ "type": "minecraft:empty", "weight": 7 })),
            LootEntry::Empty { weight: 7 }
        );
        assert!(matches!(
            decode_entry(&json!({ "type": "minecraft:empty" }), ROOT),
            Err(DecodeError::MissingField { field: "weight", .. })
        ));
    }

    #[test]
    fn item_entry_defaults() {
        let item = item(json!({ "type": "minecraft:item", "name": "minecraft:bread" }));
        assert_eq!(item.name, "minecraft:bread");
        assert_eq!(item.weight, DEFAULT_WEIGHT);
        assert!(item.functions.is_empty());
    }

    #[test]
    fn item_entry_null_fields_are_absent() {
        let item = item(json!({
            "type": "minecraft:item",
            "name": "minecraft:bread",
            "weight": null,
            "functions": null
        }));
        assert_eq!(item.weight, DEFAULT_WEIGHT);
        assert!(item.functions.is_empty());
    }

    #[test]
    fn item_entry_wrong_weight_type_fails() {
        let err = decode_entry(
            &json!({ "type": "minecraft:item", "name": "minecraft:bread", "weight": "5" }),
            "$.pools[0].entries[1]",
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "$.pools[0].entries[1].weight: expected integer, got string"
        );
    }

    #[test]
    fn item_entry_functions_must_be_array() {
        assert!(matches!(
            decode_entry(
                &json!({ "type": "minecraft:item", "name": "minecraft:bread", "functions": {} }),
                ROOT,
            ),
            Err(DecodeError::WrongType { expected: "array", .. })
        ));
    }

    #[test]
    fn functions_keep_source_order() {
        let item = item(json!({
            "type": "minecraft:item",
            "name": "minecraft:iron_sword",
            "weight": 3,
            "functions": [
                { "function": "minecraft:set_damage", "damage": { "min": 0.1, "max": 0.5 } },
                { "function": "minecraft:enchant_with_levels", "levels": 30 },
                { "function": "minecraft:set_count", "count": 1 }
            ]
        }));
        assert_eq!(item.weight, 3);
        assert_eq!(
            item.functions,
            vec![
                LootFunction::SetDamage,
                LootFunction::EnchantWithLevels,
                LootFunction::SetCount(CountValue::Constant(1)),
            ]
        );
    }

    #[test]
    fn book_with_enchant_randomly_becomes_enchanted_book() {
        let item = item(json!({
            "type": "minecraft:item",
            "name": "minecraft:book",
            "functions": [{ "function": "minecraft:enchant_randomly" }]
        }));
        assert_eq!(item.name, ENCHANTED_BOOK);
        assert!(item.has_function(&LootFunction::EnchantRandomly));
    }

    #[test]
    fn book_without_enchant_randomly_is_unchanged() {
        let plain = item(json!({ "type": "minecraft:item", "name": "minecraft:book" }));
        assert_eq!(plain.name, BOOK);

        // Only enchant_randomly triggers the rewrite.
        let levelled = item(json!({
            "type": "minecraft:item",
            "name": "minecraft:book",
            "functions": [{ "function": "minecraft:enchant_with_levels", "levels": 30 }]
        }));
        assert_eq!(levelled.name, BOOK);
    }

    #[test]
    fn enchant_randomly_on_other_items_keeps_name() {
        let sword = item(json!({
            "type": "minecraft:item",
            "name": "minecraft:golden_sword",
            "functions": [{ "function": "minecraft:enchant_randomly" }]
        }));
        assert_eq!(sword.name, "minecraft:golden_sword");
    }

    #[test]
    fn set_count_constant() {
        let function = decode_function(
            &json!({ "function": "minecraft:set_count", "count": 4 }),
            ROOT,
        )
        .unwrap();
        assert_eq!(function, LootFunction::SetCount(CountValue::Constant(4)));
    }

    #[test]
    fn set_count_uniform() {
        let function = decode_function(
            &json!({
                "function": "minecraft:set_count",
                "count": { "type": "minecraft:uniform", "min": 1.0, "max": 5.0 }
            }),
            ROOT,
        )
        .unwrap();
        assert_eq!(
            function,
            LootFunction::SetCount(CountValue::Uniform { min: 1.0, max: 5.0 })
        );
    }

    #[test]
    fn set_count_other_distribution_fails() {
        let err = decode_function(
            &json!({
                "function": "minecraft:set_count",
                "count": { "type": "minecraft:binomial", "n": 3, "p": 0.5 }
            }),
            ROOT,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnsupportedCount { ref tag, .. } if tag == "minecraft:binomial"
        ));
    }

    #[test]
    fn set_count_requires_count() {
        assert!(matches!(
            decode_function(&json!({ "function": "minecraft:set_count" }), ROOT),
            Err(DecodeError::MissingField { field: "count", .. })
        ));
    }

    #[test]
    fn unknown_function_fails() {
        let err = decode_function(
            &json!({ "function": "minecraft:furnace_smelt" }),
            "$.pools[0].entries[0].functions[0]",
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "$.pools[0].entries[0].functions[0]: loot function `minecraft:furnace_smelt` is not supported"
        );
    }

    #[test]
    fn function_tag_requires_namespace() {
        assert!(matches!(
            decode_function(&json!({ "function": "enchant_randomly" }), ROOT),
            Err(DecodeError::UnsupportedFunction { .. })
        ));
    }

    #[test]
    fn unknown_function_aborts_whole_table() {
        let json = r#"{
            "pools": [
                {
                    "rolls": 1,
                    "entries": [
                        { "type": "minecraft:empty", "weight": 1 },
                        {
                            "type": "minecraft:item",
                            "name": "minecraft:potion",
                            "functions": [{ "function": "minecraft:set_nbt", "tag": "{}" }]
                        }
                    ]
                }
            ]
        }"#;
        let err = parse_table("POTION", json).unwrap_err();
        match err {
            DecodeError::UnsupportedFunction { path, tag } => {
                assert_eq!(path, "$.pools[0].entries[1].functions[0]");
                assert_eq!(tag, "minecraft:set_nbt");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn entries_keep_source_order() {
        let pool = decode_pool(
            &json!({
                "rolls": { "min": 1, "max": 2 },
                "entries": [
                    { "type": "minecraft:item", "name": "minecraft:a" },
                    { "type": "minecraft:empty", "weight": 2 },
                    { "type": "minecraft:item", "name": "minecraft:b", "weight": 9 }
                ]
            }),
            ROOT,
        )
        .unwrap();
        let weights: Vec<i32> = pool.entries.iter().map(LootEntry::weight).collect();
        assert_eq!(weights, vec![0, 2, 9]);
    }

    #[test]
    fn pool_without_entries_fails() {
        assert!(matches!(
            decode_pool(&json!({ "rolls": 1, "entries": [] }), "$.pools[0]"),
            Err(DecodeError::EmptyPool { ref path }) if path == "$.pools[0].entries"
        ));
    }

    #[test]
    fn non_object_array_element_fails() {
        assert!(matches!(
            decode_pool(&json!({ "rolls": 1, "entries": [1] }), ROOT),
            Err(DecodeError::WrongType { expected: "object", .. })
        ));
    }

    #[test]
    fn table_requires_pools() {
        assert!(matches!(
            parse_table("EMPTY", "{}"),
            Err(DecodeError::MissingField { field: "pools", .. })
        ));
    }

    #[test]
    fn invalid_json_fails() {
        assert!(matches!(
            parse_table("BROKEN", "{\"pools\": ["),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn integers_must_fit_i32() {
        assert!(matches!(
            decode_rolls(&json!(4_000_000_000u64), ROOT),
            Err(DecodeError::IntegerOutOfRange { .. })
        ));
        assert!(matches!(
            decode_rolls(&json!(u64::MAX), ROOT),
            Err(DecodeError::IntegerOutOfRange { .. })
        ));
        assert_eq!(decode_rolls(&json!(2.0), ROOT).unwrap(), RollsValue::Constant(2));
    }
}
