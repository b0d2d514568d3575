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

use crate::config::AliquotConfig;
use aliquot_core::default_worker_count;
use anyhow::{Result, bail};
use clap::Subcommand;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Subcommands for configuration inspection and creation
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a configuration file with default values
    Init {
        path: PathBuf,
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn handle_config_command<W: Write>(command: ConfigCommands, config: &AliquotConfig, out: &mut W) -> Result<()> {
    match command {
        ConfigCommands::Show => show_config(config, out),
        ConfigCommands::Init { path, force } => init_config(path, force),
    }
}

fn show_config<W: Write>(config: &AliquotConfig, out: &mut W) -> Result<()> {
    writeln!(out, "Current Configuration")?;
    writeln!(out, "====================")?;

    writeln!(out, "Batch Settings:")?;
    match config.batch.workers {
        Some(workers) => writeln!(out, "  Workers: {workers}")?,
        None => writeln!(out, "  Workers: {} (all logical CPUs)", default_worker_count())?,
    }
    match config.batch.sieve_bound {
        Some(bound) => writeln!(out, "  Sieve Bound: {bound}")?,
        None => writeln!(out, "  Sieve Bound: ceil(sqrt(N)) + 1")?,
    }
    writeln!(out)?;

    writeln!(out, "Output Settings:")?;
    match &config.output.path {
        Some(path) => writeln!(out, "  Path: {}", path.display())?,
        None => writeln!(out, "  Path: stdout")?,
    }
    writeln!(out)?;

    writeln!(out, "Density Settings:")?;
    writeln!(out, "  Modulus: {}", config.density.modulus)?;
    writeln!(out, "  Primes: {}", config.density.primes)?;
    writeln!(out, "  Stride: {}", config.density.stride)?;

    Ok(())
}

fn init_config(path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists, pass --force to replace it", path.display());
    }
    AliquotConfig::default().save_to_file(&path)?;
    info!("Configuration written to {}", path.display());
    Ok(())
}
