//! Helpers for tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::record::Record;
use crate::value::Value;

/// Build a record from `field => value` pairs.
macro_rules! record {
    ($($field:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut record = $crate::record::Record::new();
        $(record.insert($field, $value);)*
        record
    }};
}
pub(crate) use record;

/// Kind of join key produced by [`random_records`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Int,
    Float,
    /// Integers and floats around 2^53, where neighbouring integers share
    /// the same nearest float, plus small integers and halves.
    MixedNumber,
    String,
    Boolean,
}

impl KeyKind {
    pub const ALL: [KeyKind; 5] = [
        KeyKind::Int,
        KeyKind::Float,
        KeyKind::MixedNumber,
        KeyKind::String,
        KeyKind::Boolean,
    ];
}

const PRECISION_EDGE: i64 = 1 << 53;

fn random_key(rng: &mut ChaCha8Rng, kind: KeyKind, num_keys: i64) -> Value {
    let k = rng.random_range(0..num_keys);
    match kind {
        KeyKind::Int => Value::from(k),
        KeyKind::Float => Value::from(k as f64 / 4.0),
        KeyKind::MixedNumber => match rng.random_range(0..4) {
            0 => Value::from(PRECISION_EDGE + k),
            1 => Value::from((PRECISION_EDGE + k) as f64),
            2 => Value::from(k),
            _ => Value::from(k as f64 / 2.0),
        },
        KeyKind::String => Value::from(format!("key{k}")),
        KeyKind::Boolean => Value::from(k % 2 == 0),
    }
}

/// Generate records with a key of `kind` drawn from about `num_keys`
/// distinct values under `key`, plus a couple of payload fields.
///
/// Both sides of a join share the `payload` field name so merge precedence
/// shows up in comparisons.
pub fn random_records(
    seed: u64,
    count: usize,
    num_keys: i64,
    key: &str,
    kind: KeyKind,
) -> Vec<Record> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|idx| {
            let mut record = Record::new();
            record.insert(key, random_key(&mut rng, kind, num_keys));
            record.insert("payload", rng.random_range(0..1000_i64));
            record.insert(format!("{key}_idx"), idx as i64);
            record
        })
        .collect()
}

/// Serialize each record and sort, for comparing outputs as multisets.
pub fn sorted_json(records: &[Record]) -> Vec<String> {
    let mut out: Vec<_> = records
        .iter()
        .map(|r| serde_json::to_string(r).expect("record to serialize"))
        .collect();
    out.sort();
    out
}
