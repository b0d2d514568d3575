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

//! Density command for residue-class prime shares

use super::Destination;
use crate::config::AliquotConfig;
use aliquot_core::ResidueDensity;
use aliquot_core::output::{persist_atomically, write_density_csv};
use anyhow::{Context, Result};
use clap::Args;
use std::io;
use std::path::PathBuf;
use tracing::info;

/// Arguments for the density command
#[derive(Args, Debug)]
pub struct DensityArgs {
    /// Modulus m, residues coprime to m are tracked
    #[arg(short, long)]
    pub modulus: Option<u64>,

    /// Number of primes K to walk through
    #[arg(short = 'n', long)]
    pub primes: Option<usize>,

    /// Emit every s-th sample (the last prime is always emitted)
    #[arg(short, long)]
    pub stride: Option<usize>,

    /// Output CSV file, `-` for stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Execute the density command
pub fn run_density(args: DensityArgs, config: &AliquotConfig) -> Result<()> {
    let modulus = args.modulus.unwrap_or(config.density.modulus);
    let primes = args.primes.unwrap_or(config.density.primes);
    let stride = args.stride.unwrap_or(config.density.stride);

    let stream = ResidueDensity::new(modulus, primes)
        .and_then(|stream| stream.with_stride(stride))
        .context("invalid density parameters")?;
    info!("Tracking {} residue classes mod {} over {} primes", stream.residues().len(), modulus, primes);

    let samples = match Destination::resolve(args.output, None) {
        Destination::Stdout => write_density_csv(io::stdout().lock(), stream)?,
        Destination::File(path) => {
            let mut samples = 0;
            persist_atomically(&path, |file| {
                samples = write_density_csv(file, stream)?;
                Ok(())
            })
            .with_context(|| format!("writing density table to {}", path.display()))?;
            info!("Output written to {}", path.display());
            samples
        }
    };

    info!("Wrote {} samples", samples);
    Ok(())
}
