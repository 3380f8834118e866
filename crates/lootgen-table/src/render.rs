//! Java source rendering of decoded loot tables.
//!
//! Every model type implements [`fmt::Display`] as its declaration text, so a
//! table renders bottom-up: functions and rolls first, then entries, pools and
//! finally the `LootTable` constant.

use std::fmt;

use crate::model::{CountValue, LootEntry, LootFunction, LootPool, LootTable, RollsValue};
use crate::naming::item_constant;

const TABLE_INDENT: &str = "\t";
const POOL_INDENT: &str = "\t\t\t";
const ENTRY_INDENT: &str = "\t\t\t\t\t";

impl fmt::Display for LootTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{TABLE_INDENT}public static final LootTable {} = new LootTable(",
            self.name
        )?;
        write_joined(f, &self.pools, ",\n")?;
        write!(f, "\n{TABLE_INDENT});")
    }
}

impl fmt::Display for LootPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{POOL_INDENT}new LootPool({},", self.rolls)?;
        write_joined(f, &self.entries, ",\n")?;
        write!(f, ")")
    }
}

impl fmt::Display for RollsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollsValue::Constant(n) => write!(f, "new ConstantRoll({n})"),
            RollsValue::Uniform { min, max } => write!(
                f,
                "new UniformRoll({}, {})",
                FloatLiteral(*min),
                FloatLiteral(*max)
            ),
        }
    }
}

impl fmt::Display for LootEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LootEntry::Empty { weight } => write!(f, "{ENTRY_INDENT}new EmptyEntry({weight})"),
            LootEntry::Item(item) => {
                write!(f, "{ENTRY_INDENT}new ItemEntry(Item.{}", item_constant(&item.name))?;
                if item.weight != 0 {
                    write!(f, ", {}", item.weight)?;
                }
                write!(f, ")")?;
                item.functions.iter().try_for_each(|func| write!(f, "{func}"))
            }
        }
    }
}

impl fmt::Display for LootFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LootFunction::SetCount(count) => write!(f, ".apply({count})"),
            marker => write!(f, " /* {} */ ", marker.kind()),
        }
    }
}

impl fmt::Display for CountValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountValue::Constant(n) => write!(f, "constant({n})"),
            CountValue::Uniform { min, max } => {
                write!(f, "uniform({}, {})", FloatLiteral(*min), FloatLiteral(*max))
            }
        }
    }
}

/// A Java `float` literal with exactly one fractional digit, e.g. `2.5F`.
///
/// The value is widened to `f64`, written as its shortest round-trip decimal
/// and rounded half-up to one digit, so `2.25` renders as `2.3F`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatLiteral(pub f32);

impl fmt::Display for FloatLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = f64::from(self.0);
        if value.is_nan() {
            return write!(f, "Float.NaN");
        }
        if value.is_infinite() {
            let sign = if value < 0.0 { "NEGATIVE" } else { "POSITIVE" };
            return write!(f, "Float.{sign}_INFINITY");
        }

        let sign = if value.is_sign_negative() { "-" } else { "" };
        let (whole, tenths) = round_half_up_tenths(&value.abs().to_string());
        write!(f, "{sign}{whole}.{tenths}F")
    }
}

/// Round a plain decimal string (no sign, no exponent) to one fractional
/// digit, returning the integer digits and the tenths digit.
fn round_half_up_tenths(decimal: &str) -> (String, u8) {
    let (int_part, frac_part) = decimal.split_once('.').unwrap_or((decimal, ""));
    let mut frac = frac_part.bytes().map(|b| b - b'0');

    let mut digits: Vec<u8> = int_part.bytes().map(|b| b - b'0').collect();
    digits.push(frac.next().unwrap_or(0));

    if frac.next().is_some_and(|d| d >= 5) {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let tenths = digits.pop().unwrap_or(0);
    let whole = digits.iter().map(|d| char::from(b'0' + d)).collect();
    (whole, tenths)
}

fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    separator: &str,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
