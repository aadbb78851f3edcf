use std::iter::Peekable;
use std::vec;

use tracing::{debug, trace};

use crate::errors::Result;
use crate::join::Side;
use crate::join::keys::{KeyedInput, KeyedRecord};
use crate::join::pairs::{KeyGroup, pairs};
use crate::record::Record;
use crate::value::Value;

type SortedRows = Peekable<vec::IntoIter<KeyedRecord>>;

/// Join two record sequences on `left_key` and `right_key` using sort-merge.
///
/// Both inputs are owned by the join. They're sorted by their join key, then
/// scanned once in lockstep. At each step the smallest key at the head of
/// either input is taken, the run of records with that key is drained from
/// each side, and the two runs are handed to [`pairs`].
///
/// Output is ordered by ascending key, and by the cross product order of the
/// runs within a key.
///
/// With `outer`, a run without a counterpart on the other side is passed
/// through unmerged. The scan stops as soon as either input is exhausted, so
/// whatever remains of the other input is dropped even with `outer` set. An
/// input that is empty to begin with never starts the scan: the other input
/// is returned unchanged with `outer`, and nothing is returned without.
///
/// Fails without producing output if any record lacks its join key, or if
/// the key values are not all of the same kind.
pub fn join(
    left: Vec<Record>,
    left_key: &str,
    right: Vec<Record>,
    right_key: &str,
    outer: bool,
) -> Result<Vec<Record>> {
    let mut left = KeyedInput::try_new(Side::Left, left_key, left)?;
    let mut right = KeyedInput::try_new(Side::Right, right_key, right)?;
    left.ensure_comparable(&right)?;

    if left.rows.is_empty() || right.rows.is_empty() {
        // Nothing to scan. With `outer` the non-empty input is passed through
        // in its original order.
        debug!(outer, "join input empty");
        return Ok(pairs(left.into_records(), right.into_records(), outer));
    }

    left.sort();
    right.sort();

    let mut left_rows = left.rows.into_iter().peekable();
    let mut right_rows = right.rows.into_iter().peekable();

    let mut output = Vec::new();
    let mut num_groups = 0;

    loop {
        let min_key = match (left_rows.peek(), right_rows.peek()) {
            (Some(l), Some(r)) => std::cmp::min(&l.key, &r.key).clone(),
            _ => break,
        };

        let left_group = take_run(Side::Left, &mut left_rows, &min_key)?;
        let right_group = take_run(Side::Right, &mut right_rows, &min_key)?;
        trace!(
            key = %min_key,
            left = left_group.len(),
            right = right_group.len(),
            "merging key group"
        );

        output.extend(pairs(
            left_group.into_records(),
            right_group.into_records(),
            outer,
        ));
        num_groups += 1;
    }

    let (left_remaining, right_remaining) = (left_rows.len(), right_rows.len());
    if outer && left_remaining + right_remaining > 0 {
        let (side, remaining) = if left_remaining > 0 {
            (Side::Left, left_remaining)
        } else {
            (Side::Right, right_remaining)
        };
        debug!(%side, remaining, "input exhausted, dropping remaining outer join records");
    }

    debug!(groups = num_groups, output_rows = output.len(), "sort-merge join complete");

    Ok(output)
}

/// Drain the leading records with a key equal to `key`.
fn take_run(side: Side, rows: &mut SortedRows, key: &Value) -> Result<KeyGroup> {
    let mut run = Vec::new();
    while let Some(row) = rows.next_if(|row| &row.key == key) {
        run.push(row);
    }
    KeyGroup::try_from_keyed(side, key.clone(), run)
}
