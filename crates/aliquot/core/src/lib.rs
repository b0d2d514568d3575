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

//! Aliquot Core Library
//!
//! Batch engine that factors every integer in `[1, N]`, evaluates the
//! aliquot sum `sigma(n) - n` and produces one row per integer in ascending
//! order. The work is split into contiguous chunks that run in parallel
//! against a shared prime table; the output does not depend on the worker
//! count.

pub mod coordinator;
pub mod density;
pub mod error;
pub mod factor;
pub mod output;
pub mod partition;
pub mod row;
pub mod sieve;
pub mod sigma;

pub use coordinator::{BatchConfig, BatchCoordinator, BatchOutput, BatchReport, default_worker_count};
pub use density::{DensitySample, ResidueDensity};
pub use error::{AliquotError, AliquotResult};
pub use factor::{Factorization, PrimePower, factorize, factorize_unsieved};
pub use partition::{Chunk, partition};
pub use row::{FACTOR_SEPARATOR, ResultRow, format_factorization};
pub use sieve::PrimeTable;
pub use sigma::{Classification, aliquot_sum, classify, divisor_sum};
