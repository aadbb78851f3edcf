use crate::errors::{JoinError, Result};
use crate::join::Side;
use crate::join::keys::KeyedRecord;
use crate::join::merge::merge;
use crate::record::Record;
use crate::value::Value;

/// Produce the output rows for two groups of records sharing a key value.
///
/// When both groups are non-empty, or `pad_when_empty` is false, this is the
/// cross product of merged records with `left` as the outer loop. An empty
/// group then yields no rows.
///
/// With `pad_when_empty`, an empty group on one side causes the other group
/// to be returned as is, unmerged. No placeholder fields are added for the
/// missing side.
pub fn pairs(left: Vec<Record>, right: Vec<Record>, pad_when_empty: bool) -> Vec<Record> {
    if !pad_when_empty || (!left.is_empty() && !right.is_empty()) {
        let mut out = Vec::with_capacity(left.len() * right.len());
        for l in &left {
            for r in &right {
                out.push(merge(l, r));
            }
        }
        return out;
    }

    if left.is_empty() { right } else { left }
}

/// A maximal run of records from one side sharing a join key value.
#[derive(Debug)]
pub struct KeyGroup {
    side: Side,
    key: Value,
    records: Vec<Record>,
}

impl KeyGroup {
    /// Create a group from records with already extracted keys.
    ///
    /// Every key must equal `key`.
    pub(crate) fn try_from_keyed(side: Side, key: Value, rows: Vec<KeyedRecord>) -> Result<Self> {
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            if row.key != key {
                return Err(JoinError::MalformedGroup {
                    side,
                    expected: key,
                    found: row.key,
                });
            }
            records.push(row.record);
        }

        Ok(KeyGroup { side, key, records })
    }

    /// Create a group by reading `key_name` from each record.
    pub fn try_new(side: Side, key_name: &str, key: Value, records: Vec<Record>) -> Result<Self> {
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| match record.get(key_name) {
                Some(k) => Ok(KeyedRecord {
                    key: k.clone(),
                    record,
                }),
                None => Err(JoinError::MissingKey {
                    side,
                    key: key_name.to_string(),
                    index,
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        Self::try_from_keyed(side, key, rows)
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn key(&self) -> &Value {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::record;

    fn left_group() -> Vec<Record> {
        vec![record!("k" => 1, "a" => 1), record!("k" => 1, "a" => 2)]
    }

    fn right_group() -> Vec<Record> {
        vec![record!("k" => 1, "b" => 1), record!("k" => 1, "b" => 2)]
    }

    #[test]
    fn cross_product_order() {
        let out = pairs(left_group(), right_group(), false);
        let expected = vec![
            record!("k" => 1, "a" => 1, "b" => 1),
            record!("k" => 1, "a" => 1, "b" => 2),
            record!("k" => 1, "a" => 2, "b" => 1),
            record!("k" => 1, "a" => 2, "b" => 2),
        ];
        assert_eq!(expected, out);
    }

    #[test]
    fn padding_does_not_change_full_groups() {
        assert_eq!(
            pairs(left_group(), right_group(), false),
            pairs(left_group(), right_group(), true)
        );
    }

    #[test]
    fn inner_with_empty_group() {
        assert!(pairs(left_group(), vec![], false).is_empty());
        assert!(pairs(vec![], right_group(), false).is_empty());
        assert!(pairs(vec![], vec![], false).is_empty());
    }

    #[test]
    fn padded_passes_through_other_side() {
        assert_eq!(left_group(), pairs(left_group(), vec![], true));
        assert_eq!(right_group(), pairs(vec![], right_group(), true));
        assert!(pairs(vec![], vec![], true).is_empty());
    }

    #[test]
    fn group_rejects_mixed_keys() {
        let records = vec![record!("k" => 1), record!("k" => 2)];
        let err = KeyGroup::try_new(Side::Left, "k", Value::from(1), records).unwrap_err();
        assert!(matches!(err, JoinError::MalformedGroup { side: Side::Left, .. }));
    }

    #[test]
    fn group_rejects_missing_key() {
        let records = vec![record!("k" => 1), record!("j" => 1)];
        let err = KeyGroup::try_new(Side::Right, "k", Value::from(1), records).unwrap_err();
        assert!(matches!(err, JoinError::MissingKey { index: 1, .. }));
    }

    #[test]
    fn group_accepts_equal_numbers() {
        let records = vec![record!("k" => 1), record!("k" => 1.0)];
        let group = KeyGroup::try_new(Side::Left, "k", Value::from(1), records).unwrap();
        assert_eq!(2, group.len());
        assert_eq!(&Value::from(1), group.key());
    }
}
