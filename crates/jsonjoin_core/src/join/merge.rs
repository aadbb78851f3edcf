use crate::record::Record;

/// Merge two records into a new one.
///
/// The result holds every field of `left` followed by the fields only
/// `right` has. Fields present in both take the value from `right`.
pub fn merge(left: &Record, right: &Record) -> Record {
    let mut merged = Record::with_capacity(left.len() + right.len());
    merged.extend(
        left.iter()
            .chain(right.iter())
            .map(|(k, v)| (k.to_string(), v.clone())),
    );
    merged
}
