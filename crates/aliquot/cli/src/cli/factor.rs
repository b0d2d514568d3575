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

//! Factor command for inspecting single integers

use aliquot_core::{Classification, PrimeTable, aliquot_sum, classify, divisor_sum, factorize, factorize_unsieved};
use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::io::Write;
use tracing::debug;

/// Values above this squared are factored without a shared table
pub const TABLE_LIMIT: u64 = 1 << 20;

/// Arguments for the factor command
#[derive(Args, Debug)]
pub struct FactorArgs {
    /// Integers to factor
    #[arg(value_name = "N", required = true, num_args = 1..)]
    pub values: Vec<u64>,

    /// Print one JSON object per line
    #[arg(short, long)]
    pub json: bool,
}

/// Everything the factor command knows about one integer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorReport {
    pub n: u64,
    pub factorization: String,
    pub sigma: u128,
    pub aliquot_sum: u128,
    pub classification: Classification,
}

impl FactorReport {
    pub fn compute(n: u64, table: &PrimeTable) -> Result<Self> {
        let factorization = if table.covers(n) { factorize(n, table) } else { factorize_unsieved(n) };
        let factorization = factorization.with_context(|| format!("factoring {n}"))?;
        let sigma = divisor_sum(&factorization)?;
        let aliquot = aliquot_sum(&factorization)?;
        Ok(Self {
            n,
            factorization: factorization.to_string(),
            sigma,
            aliquot_sum: aliquot,
            classification: classify(n, aliquot),
        })
    }
}

/// Execute the factor command
pub fn run_factor<W: Write>(args: FactorArgs, out: &mut W) -> Result<()> {
    // the table stays small, larger values fall back to plain trial division
    let largest = args.values.iter().copied().max().unwrap_or(1);
    let table = PrimeTable::sieve(PrimeTable::required_bound(largest).min(TABLE_LIMIT) as i64)?;
    debug!(largest, primes = table.len(), limit = table.limit(), "prime table ready");

    for n in args.values {
        let report = FactorReport::compute(n, &table)?;
        if args.json {
            writeln!(out, "{}", serde_json::to_string(&report)?)?;
        } else {
            writeln!(
                out,
                "{} = {}  sigma = {}  aliquot sum = {} ({})",
                report.n, report.factorization, report.sigma, report.aliquot_sum, report.classification
            )?;
        }
    }

    Ok(())
}
