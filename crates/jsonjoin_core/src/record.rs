use std::io::Read;

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::errors::RecordError;
use crate::value::{Value, json_type_name};

/// A schemaless record mapping field names to values.
///
/// Field order follows insertion order. Overwriting an existing field keeps
/// its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Record {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Set a field, returning the previous value if there was one.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Convert a parsed JSON value into a record.
    ///
    /// `index` is only used for error reporting.
    pub fn try_from_json(index: usize, value: serde_json::Value) -> Result<Self, RecordError> {
        let obj = match value {
            serde_json::Value::Object(obj) => obj,
            other => {
                return Err(RecordError::NotAnObject {
                    index,
                    found: json_type_name(&other),
                });
            }
        };

        let mut record = Record::with_capacity(obj.len());
        for (field, value) in obj {
            let value = Value::try_from_json(&field, value)?;
            record.fields.insert(field, value);
        }

        Ok(record)
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Record {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Extend<(String, Value)> for Record {
    fn extend<T: IntoIterator<Item = (String, Value)>>(&mut self, iter: T) {
        self.fields.extend(iter)
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Convert a parsed JSON array of objects into records.
pub fn records_from_json(value: serde_json::Value) -> Result<Vec<Record>, RecordError> {
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| Record::try_from_json(idx, item))
            .collect(),
        other => Err(RecordError::NotAnArray(json_type_name(&other))),
    }
}

/// Read a JSON array of records.
pub fn records_from_reader(reader: impl Read) -> Result<Vec<Record>, RecordError> {
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    records_from_json(value)
}

pub fn records_from_str(s: &str) -> Result<Vec<Record>, RecordError> {
    let value: serde_json::Value = serde_json::from_str(s)?;
    records_from_json(value)
}
