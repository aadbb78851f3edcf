//! Equi-join implementations over record sequences.

pub mod merge;
pub mod nested_loop;
pub mod pairs;
pub mod sort_merge;

mod keys;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{JoinError, Result};
use crate::record::Record;

/// Which input of a join a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Algorithm used to execute a join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinAlgorithm {
    /// Sort both inputs, then scan them once in lockstep.
    #[default]
    SortMerge,
    /// Compare every pair of records. Inner joins only.
    NestedLoop,
}

impl fmt::Display for JoinAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinAlgorithm::SortMerge => write!(f, "sort_merge"),
            JoinAlgorithm::NestedLoop => write!(f, "nested_loop"),
        }
    }
}

impl FromStr for JoinAlgorithm {
    type Err = JoinError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "sort_merge" | "merge" => Ok(JoinAlgorithm::SortMerge),
            "nested_loop" | "nested" => Ok(JoinAlgorithm::NestedLoop),
            other => Err(JoinError::Unsupported(format!(
                "unknown join algorithm '{other}'"
            ))),
        }
    }
}

/// Configuration for a single join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinConfig {
    /// Field to join on in the left input.
    pub left_key: String,
    /// Field to join on in the right input.
    pub right_key: String,
    /// Pass unmatched key groups through instead of dropping them.
    ///
    /// Applies to both sides, but only while neither input is exhausted.
    #[serde(default)]
    pub outer: bool,
    #[serde(default)]
    pub algorithm: JoinAlgorithm,
}

impl JoinConfig {
    pub fn new(left_key: impl Into<String>, right_key: impl Into<String>) -> Self {
        JoinConfig {
            left_key: left_key.into(),
            right_key: right_key.into(),
            outer: false,
            algorithm: JoinAlgorithm::default(),
        }
    }

    pub fn with_outer(mut self, outer: bool) -> Self {
        self.outer = outer;
        self
    }

    pub fn with_algorithm(mut self, algorithm: JoinAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Run the join, taking ownership of both inputs.
    pub fn execute(&self, left: Vec<Record>, right: Vec<Record>) -> Result<Vec<Record>> {
        debug!(
            algorithm = %self.algorithm,
            left_key = %self.left_key,
            right_key = %self.right_key,
            outer = self.outer,
            left_rows = left.len(),
            right_rows = right.len(),
            "executing join"
        );

        match self.algorithm {
            JoinAlgorithm::SortMerge => {
                sort_merge::join(left, &self.left_key, right, &self.right_key, self.outer)
            }
            JoinAlgorithm::NestedLoop => {
                if self.outer {
                    return Err(JoinError::Unsupported(
                        "outer joins require the sort_merge algorithm".to_string(),
                    ));
                }
                nested_loop::nested_loop_join(left, &self.left_key, right, &self.right_key)
            }
        }
    }
}
