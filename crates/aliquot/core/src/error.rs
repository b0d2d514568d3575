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

//! Batch Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Result type for aliquot operations
pub type AliquotResult<T> = Result<T, AliquotError>;

/// Errors that abort a batch run
///
/// Every variant is fatal for the batch: there is no partial-output mode.
#[derive(Error, Debug)]
pub enum AliquotError {
    #[error("Invalid sieve bound {bound}: {reason}")]
    InvalidBound { bound: i64, reason: String },

    #[error("Invalid range: {reason}")]
    InvalidRange { reason: String },

    #[error("Malformed factorization of n = {n}: {reason}")]
    MalformedFactorization { n: u64, reason: String },

    #[error("Arithmetic overflow while evaluating sigma(n) for n = {n}")]
    ArithmeticOverflow { n: u64 },

    #[error("Worker pool could not be started: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("I/O failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),
}

impl AliquotError {
    /// Create an invalid bound error
    pub fn invalid_bound(bound: i64, reason: impl Into<String>) -> Self {
        Self::InvalidBound { bound, reason: reason.into() }
    }

    /// Create an invalid range error
    pub fn invalid_range(reason: impl Into<String>) -> Self {
        Self::InvalidRange { reason: reason.into() }
    }

    /// Create a malformed factorization error
    pub fn malformed(n: u64, reason: impl Into<String>) -> Self {
        Self::MalformedFactorization { n, reason: reason.into() }
    }

    /// Create an I/O error bound to the path that failed
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// The integer that triggered the failure, if the failure is tied to one
    pub fn failing_n(&self) -> Option<u64> {
        match self {
            Self::MalformedFactorization { n, .. } | Self::ArithmeticOverflow { n } => Some(*n),
            _ => None,
        }
    }
}
