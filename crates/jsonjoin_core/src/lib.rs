//! Equi-joins over sequences of schemaless records.
//!
//! Records map field names to numbers, strings or booleans. Two sequences
//! are joined on a named key from each side using a sort-merge join, with a
//! nested loop join available as a reference.

pub mod errors;
pub mod join;
pub mod record;
pub mod value;

#[cfg(test)]
pub(crate) mod testutil;

pub use join::merge::merge;
pub use join::nested_loop::nested_loop_join;
pub use join::pairs::{KeyGroup, pairs};
pub use join::sort_merge::join;
pub use join::{JoinAlgorithm, JoinConfig, Side};
pub use record::{Record, records_from_json, records_from_reader, records_from_str};
pub use value::{Number, Value, ValueKind};
