use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use jsonjoin_core::JoinAlgorithm;

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum AlgorithmArg {
    /// Sort both inputs then merge them in one pass.
    #[default]
    SortMerge,
    /// Compare every pair of records. Inner joins only.
    NestedLoop,
}

impl From<AlgorithmArg> for JoinAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::SortMerge => JoinAlgorithm::SortMerge,
            AlgorithmArg::NestedLoop => JoinAlgorithm::NestedLoop,
        }
    }
}

#[derive(Debug, Parser)]
pub struct JoinArgs {
    /// Path to a JSON array of objects for the left side.
    pub left_file: PathBuf,

    /// Field in the left file to join on.
    pub left_key: String,

    /// Path to a JSON array of objects for the right side.
    pub right_file: PathBuf,

    /// Field in the right file to join on.
    pub right_key: String,

    /// Pass unmatched key groups through instead of dropping them.
    ///
    /// Once either input runs out, anything left in the other input is still
    /// dropped.
    #[clap(long)]
    pub outer: bool,

    /// Join algorithm to use.
    #[clap(long, value_enum, default_value_t = AlgorithmArg::SortMerge, env = "JSONJOIN_ALGORITHM")]
    pub algorithm: AlgorithmArg,

    #[clap(flatten)]
    pub output: OutputOpts,
}

#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// Page files to validate, in page order.
    ///
    /// Each file holds an object with `customers`, `validations` and an
    /// optional `pagination` block.
    #[clap(required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Error if the number of files doesn't match the page count in the
    /// first page's pagination block.
    #[clap(long)]
    pub check_pagination: bool,

    #[clap(flatten)]
    pub output: OutputOpts,
}

#[derive(Debug, Clone, Parser)]
pub struct OutputOpts {
    /// Pretty print the JSON output.
    #[clap(long, env = "JSONJOIN_PRETTY")]
    pub pretty: bool,
}
