// Aliquot
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Table command for writing the aliquot sum table of `[1, N]`

use super::Destination;
use crate::config::AliquotConfig;
use aliquot_core::output::{write_csv, write_csv_file};
use aliquot_core::{BatchConfig, BatchCoordinator, default_worker_count};
use anyhow::{Context, Result};
use clap::Args;
use std::io;
use std::path::PathBuf;
use tracing::info;

/// Arguments for the table command
#[derive(Args, Debug)]
pub struct TableArgs {
    /// Upper bound N of the range [1, N]
    #[arg(value_name = "N")]
    pub upper_bound: u64,

    /// Output CSV file, `-` for stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Worker threads (defaults to the number of logical CPUs)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Sieve limit, at least ceil(sqrt(N)) + 1
    #[arg(long, allow_negative_numbers = true)]
    pub sieve_bound: Option<i64>,
}

impl TableArgs {
    /// Merge flags over the configuration file
    pub fn batch_config(&self, config: &AliquotConfig) -> BatchConfig {
        let workers = self.workers.or(config.batch.workers).unwrap_or_else(default_worker_count);
        let sieve_bound = self.sieve_bound.or(config.batch.sieve_bound);
        BatchConfig::new(self.upper_bound).with_workers(workers).with_sieve_bound(sieve_bound)
    }
}

/// Execute the table command
pub fn run_table(args: TableArgs, config: &AliquotConfig) -> Result<()> {
    let batch = args.batch_config(config);
    let destination = Destination::resolve(args.output, config.output.path.as_deref());

    info!("Computing aliquot sums for N = {} on {} workers", batch.upper_bound, batch.worker_count);
    let coordinator = BatchCoordinator::new(batch).context("invalid batch configuration")?;
    let output = coordinator.run().context("batch aborted, no output written")?;

    let report = &output.report;
    info!(
        "Computed {} rows in {:?} ({} chunks, {} primes up to {})",
        output.rows.len(),
        report.elapsed,
        report.chunk_count,
        report.prime_count,
        report.sieve_bound
    );

    match destination {
        Destination::Stdout => write_csv(io::stdout().lock(), &output.rows).context("writing table to stdout")?,
        Destination::File(path) => {
            write_csv_file(&path, &output.rows).with_context(|| format!("writing table to {}", path.display()))?;
            info!("Output written to {}", path.display());
        }
    }

    Ok(())
}
