use crate::join::Side;
use crate::value::{Value, ValueKind};

#[derive(Debug, thiserror::Error)]
pub enum JoinError {
    #[error("Record {index} on the {side} side is missing join key '{key}'")]
    MissingKey {
        side: Side,
        key: String,
        index: usize,
    },

    #[error("Join key '{key}' on the {side} side has {found} values, expected {expected}")]
    TypeMismatch {
        side: Side,
        key: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("Key group on the {side} side mixes key {expected} with key {found}")]
    MalformedGroup {
        side: Side,
        expected: Value,
        found: Value,
    },

    #[error("Unsupported: {0}")]
    Unsupported(String),
}

pub type Result<T, E = JoinError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Expected a JSON array of records, got {0}")]
    NotAnArray(&'static str),

    #[error("Record {index} is not a JSON object, got {found}")]
    NotAnObject { index: usize, found: &'static str },

    #[error("Field '{field}' has unsupported value type {found}")]
    UnsupportedValue { field: String, found: &'static str },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
