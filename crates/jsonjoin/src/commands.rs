use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use clap::Subcommand;
use jsonjoin_core::{JoinConfig, Record, records_from_reader};
use jsonjoin_validate::Page;
use serde::Serialize;
use tracing::info;

use crate::args::{JoinArgs, OutputOpts, ValidateArgs};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Join two JSON arrays of objects on a key from each.
    Join(JoinArgs),
    /// Validate pages of customers against their validation rules.
    Validate(ValidateArgs),
}

impl Commands {
    /// Run the command, writing JSON results to `out`.
    pub fn run(self, out: &mut dyn Write) -> Result<()> {
        match self {
            Commands::Join(join) => join.run(out),
            Commands::Validate(validate) => validate.run(out),
        }
    }
}

trait RunCommand {
    fn run(self, out: &mut dyn Write) -> Result<()>;
}

impl RunCommand for JoinArgs {
    fn run(self, out: &mut dyn Write) -> Result<()> {
        let left = read_records(&self.left_file)?;
        let right = read_records(&self.right_file)?;
        info!(
            left = %self.left_file.display(),
            right = %self.right_file.display(),
            left_rows = left.len(),
            right_rows = right.len(),
            "loaded join inputs"
        );

        let conf = JoinConfig::new(self.left_key, self.right_key)
            .with_outer(self.outer)
            .with_algorithm(self.algorithm.into());
        let joined = conf.execute(left, right)?;

        write_json(out, &self.output, &joined)
    }
}

impl RunCommand for ValidateArgs {
    fn run(self, out: &mut dyn Write) -> Result<()> {
        let mut invalid = Vec::new();

        for (idx, path) in self.files.iter().enumerate() {
            let file = File::open(path)
                .with_context(|| format!("failed to open '{}'", path.display()))?;
            let page = Page::from_reader(BufReader::new(file))
                .with_context(|| format!("failed to read page from '{}'", path.display()))?;

            if idx == 0 && self.check_pagination {
                let pagination = page
                    .pagination
                    .ok_or_else(|| anyhow!("'{}' has no pagination block", path.display()))?;
                let expected = pagination.num_pages()?;
                if expected != self.files.len() as u64 {
                    return Err(anyhow!(
                        "pagination expects {expected} pages, got {} files",
                        self.files.len()
                    ));
                }
            }

            let page_invalid = page.validate()?;
            info!(page = %path.display(), invalid = page_invalid.len(), "validated page");
            invalid.extend(page_invalid);
        }

        write_json(out, &self.output, &invalid)
    }
}

fn read_records(path: &Path) -> Result<Vec<Record>> {
    let file =
        File::open(path).with_context(|| format!("failed to open '{}'", path.display()))?;
    let records = records_from_reader(BufReader::new(file))
        .with_context(|| format!("failed to read records from '{}'", path.display()))?;
    Ok(records)
}

fn write_json<T: Serialize>(out: &mut dyn Write, opts: &OutputOpts, value: &T) -> Result<()> {
    if opts.pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
