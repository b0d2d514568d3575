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

pub mod configure;
pub mod density;
pub mod factor;
pub mod table;

use crate::config::AliquotConfig;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};

use self::configure::ConfigCommands;
use self::density::DensityArgs;
use self::factor::FactorArgs;
use self::table::TableArgs;

#[derive(Parser, Debug)]
#[command(name = "aliquot")]
#[command(about = "Aliquot - prime factorization and aliquot sum tables")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write n, sigma(n) - n and the factorization of every n in [1, N]
    Table(TableArgs),
    /// Factor individual integers
    Factor(FactorArgs),
    /// Running share of primes in each residue class coprime to a modulus
    Density(DensityArgs),
    /// Inspect or create configuration files
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Dispatch a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    let config = AliquotConfig::resolve_config(cli.config)?;

    match cli.command {
        Commands::Table(args) => table::run_table(args, &config),
        Commands::Factor(args) => factor::run_factor(args, &mut io::stdout().lock()),
        Commands::Density(args) => density::run_density(args, &config),
        Commands::Config(command) => configure::handle_config_command(command, &config, &mut io::stdout().lock()),
    }
}

/// Where tabular output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    /// `-` or nothing means stdout
    pub fn resolve(flag: Option<PathBuf>, configured: Option<&Path>) -> Self {
        match flag.or_else(|| configured.map(Path::to_path_buf)) {
            Some(path) if path.as_os_str() != "-" => Destination::File(path),
            _ => Destination::Stdout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_resolution() {
        assert_eq!(Destination::resolve(None, None), Destination::Stdout);
        assert_eq!(Destination::resolve(Some(PathBuf::from("-")), Some(Path::new("a.csv"))), Destination::Stdout);
        assert_eq!(Destination::resolve(None, Some(Path::new("a.csv"))), Destination::File(PathBuf::from("a.csv")));
        assert_eq!(Destination::resolve(Some(PathBuf::from("b.csv")), Some(Path::new("a.csv"))), Destination::File(PathBuf::from("b.csv")));
    }

    #[test]
    fn test_parse_table_command() {
        let cli = Cli::try_parse_from(["aliquot", "table", "100", "-w", "4", "-o", "out.csv"]).unwrap();
        match cli.command {
            Commands::Table(args) => {
                assert_eq!(args.upper_bound, 100);
                assert_eq!(args.workers, Some(4));
                assert_eq!(args.output, Some(PathBuf::from("out.csv")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_negative_sieve_bound() {
        let cli = Cli::try_parse_from(["aliquot", "table", "100", "--sieve-bound", "-4"]).unwrap();
        match cli.command {
            Commands::Table(args) => assert_eq!(args.sieve_bound, Some(-4)),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_factor_requires_values() {
        assert!(Cli::try_parse_from(["aliquot", "factor"]).is_err());
    }
}
