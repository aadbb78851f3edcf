use tracing::debug;

use crate::errors::Result;
use crate::join::Side;
use crate::join::keys::KeyedInput;
use crate::join::merge::merge;
use crate::record::Record;

/// Inner join two record sequences by comparing every pair of records.
///
/// O(n*m). Output follows input order with `left` as the outer loop. Keys
/// are validated the same way as the sort-merge join so both fail on the
/// same inputs.
pub fn nested_loop_join(
    left: Vec<Record>,
    left_key: &str,
    right: Vec<Record>,
    right_key: &str,
) -> Result<Vec<Record>> {
    let left = KeyedInput::try_new(Side::Left, left_key, left)?;
    let right = KeyedInput::try_new(Side::Right, right_key, right)?;
    left.ensure_comparable(&right)?;

    let mut output = Vec::new();
    for l in &left.rows {
        for r in &right.rows {
            if l.key == r.key {
                output.push(merge(&l.record, &r.record));
            }
        }
    }

    debug!(output_rows = output.len(), "nested loop join complete");

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::JoinError;
    use crate::testutil::record;

    #[test]
    fn input_order_preserved() {
        let left = vec![
            record!("id" => 2, "l" => "x"),
            record!("id" => 1, "l" => "y"),
        ];
        let right = vec![
            record!("id" => 1, "r" => "p"),
            record!("id" => 2, "r" => "q"),
            record!("id" => 2, "r" => "s"),
        ];
        let out = nested_loop_join(left, "id", right, "id").unwrap();
        let expected = vec![
            record!("id" => 2, "l" => "x", "r" => "q"),
            record!("id" => 2, "l" => "x", "r" => "s"),
            record!("id" => 1, "l" => "y", "r" => "p"),
        ];
        assert_eq!(expected, out);
    }

    #[test]
    fn no_matches() {
        let out = nested_loop_join(
            vec![record!("a" => true)],
            "a",
            vec![record!("b" => false)],
            "b",
        )
        .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn missing_key() {
        let err = nested_loop_join(vec![], "a", vec![record!("b" => 1)], "a").unwrap_err();
        assert!(matches!(err, JoinError::MissingKey { side: Side::Right, .. }));
    }
}
