//! Loot table decode errors.

use thiserror::Error;

/// Errors past JSON parsing carry the path of the offending value, e.g.
/// `$.pools[0].entries[2].functions[1]`.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid loot table JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{path}: missing required field `{field}`")]
    MissingField { path: String, field: &'static str },

    #[error("{path}: expected {expected}, got {got}")]
    WrongType {
        path: String,
        expected: &'static str,
        got: &'static str,
    },

    #[error("{path}: integer {value} does not fit in 32 bits")]
    IntegerOutOfRange { path: String, value: String },

    #[error("{path}: pool has no entries")]
    EmptyPool { path: String },

    #[error("{path}: loot function `{tag}` is not supported")]
    UnsupportedFunction { path: String, tag: String },

    #[error("{path}: count distribution `{tag}` is not supported")]
    UnsupportedCount { path: String, tag: String },
}
