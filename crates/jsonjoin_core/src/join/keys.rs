use crate::errors::{JoinError, Result};
use crate::join::Side;
use crate::record::Record;
use crate::value::{Value, ValueKind};

/// A record paired with its extracted join key.
#[derive(Debug, Clone)]
pub(crate) struct KeyedRecord {
    pub key: Value,
    pub record: Record,
}

/// One input of a join with every join key extracted and checked.
#[derive(Debug)]
pub(crate) struct KeyedInput {
    pub side: Side,
    pub key_name: String,
    /// Kind shared by all keys. None if the input is empty.
    pub kind: Option<ValueKind>,
    pub rows: Vec<KeyedRecord>,
}

impl KeyedInput {
    /// Extract the join key from every record.
    ///
    /// Errors if any record is missing the key, or if the keys are of more
    /// than one kind.
    pub fn try_new(side: Side, key_name: &str, records: Vec<Record>) -> Result<Self> {
        let mut kind = None;
        let mut rows = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            let key = record
                .get(key_name)
                .cloned()
                .ok_or_else(|| JoinError::MissingKey {
                    side,
                    key: key_name.to_string(),
                    index,
                })?;

            match kind {
                None => kind = Some(key.kind()),
                Some(expected) if expected != key.kind() => {
                    return Err(JoinError::TypeMismatch {
                        side,
                        key: key_name.to_string(),
                        expected,
                        found: key.kind(),
                    });
                }
                Some(_) => (),
            }

            rows.push(KeyedRecord { key, record });
        }

        Ok(KeyedInput {
            side,
            key_name: key_name.to_string(),
            kind,
            rows,
        })
    }

    /// Check that keys from this input can be compared with keys from
    /// `other`.
    ///
    /// An empty input is compatible with anything.
    pub fn ensure_comparable(&self, other: &KeyedInput) -> Result<()> {
        match (self.kind, other.kind) {
            (Some(expected), Some(found)) if expected != found => Err(JoinError::TypeMismatch {
                side: other.side,
                key: other.key_name.clone(),
                expected,
                found,
            }),
            _ => Ok(()),
        }
    }

    pub fn into_records(self) -> Vec<Record> {
        self.rows.into_iter().map(|row| row.record).collect()
    }

    /// Stable sort by join key, ascending.
    pub fn sort(&mut self) {
        self.rows.sort_by(|a, b| a.key.cmp(&b.key));
    }
}
