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

//! CLI configuration file
//!
//! Resolution order: `--config`, then `$ALIQUOT_CONFIG`, then defaults.
//! `$ALIQUOT_WORKERS` overrides the worker count of whichever file was loaded,
//! and command-line flags override both.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "ALIQUOT_CONFIG";
pub const WORKERS_ENV: &str = "ALIQUOT_WORKERS";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AliquotConfig {
    pub batch: BatchSection,
    pub output: OutputSection,
    pub density: DensitySection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSection {
    /// Worker threads, defaults to the number of logical CPUs
    pub workers: Option<usize>,
    /// Explicit sieve limit, defaults to `ceil(sqrt(N)) + 1`
    pub sieve_bound: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Destination for the table, stdout when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensitySection {
    pub modulus: u64,
    pub primes: usize,
    pub stride: usize,
}

impl Default for DensitySection {
    fn default() -> Self {
        Self {
            modulus: 10,
            primes: 50_000,
            stride: 1,
        }
    }
}

impl AliquotConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("writing config {}", path.display()))?;
        Ok(())
    }

    pub fn resolve_config(cli_config: Option<PathBuf>) -> Result<Self> {
        let mut config = if let Some(config_path) = cli_config {
            Self::load_from_file(config_path)?
        } else if let Ok(env_config) = std::env::var(CONFIG_ENV) {
            Self::load_from_file(env_config)?
        } else {
            Self::default()
        };

        if let Ok(workers) = std::env::var(WORKERS_ENV) {
            let workers = workers.parse::<usize>().with_context(|| format!("${WORKERS_ENV} must be a positive integer, got {workers:?}"))?;
            config.batch.workers = Some(workers);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AliquotConfig = toml::from_str("[batch]\nworkers = 3\n").unwrap();
        assert_eq!(config.batch.workers, Some(3));
        assert_eq!(config.batch.sieve_bound, None);
        assert_eq!(config.density, DensitySection::default());
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("aliquot.toml");

        let mut config = AliquotConfig::default();
        config.batch.workers = Some(6);
        config.output.path = Some(PathBuf::from("sigma.csv"));
        config.density.stride = 250;
        config.save_to_file(&path).unwrap();

        assert_eq!(AliquotConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("aliquot.toml");
        std::fs::write(&path, "[density]\nmodulus = 7\n").unwrap();

        let config = AliquotConfig::resolve_config(Some(path)).unwrap();
        assert_eq!(config.density.modulus, 7);
        assert_eq!(config.density.primes, 50_000);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(AliquotConfig::resolve_config(Some(dir.path().join("absent.toml"))).is_err());
    }
}
