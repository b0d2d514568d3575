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

//! Range Partitioner
//!
//! Splits `[1, N]` into contiguous, ordered chunks, one per worker. The
//! first `W - 1` chunks hold `N / W` values each and the last chunk takes the
//! remainder. With fewer values than workers the worker count shrinks to `N`.

use crate::error::{AliquotError, AliquotResult};
use std::fmt;
use std::ops::RangeInclusive;

/// Inclusive, non-empty interval of integers handed to one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chunk {
    start: u64,
    end: u64,
}

impl Chunk {
    /// Chunk `[start, end]`, rejecting empty intervals and zero
    pub fn new(start: u64, end: u64) -> AliquotResult<Self> {
        if start < 1 {
            return Err(AliquotError::invalid_range("chunks start at 1 or later"));
        }
        if start > end {
            return Err(AliquotError::invalid_range(format!("chunk [{start}, {end}] is empty")));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Number of integers in the chunk
    pub fn size(&self) -> u64 {
        self.end - self.start + 1
    }

    pub fn values(&self) -> RangeInclusive<u64> {
        self.start..=self.end
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Partition `[1, upper_bound]` across `workers` chunks
pub fn partition(upper_bound: u64, workers: usize) -> AliquotResult<Vec<Chunk>> {
    if upper_bound < 1 {
        return Err(AliquotError::invalid_range("upper bound N must be at least 1"));
    }
    if workers < 1 {
        return Err(AliquotError::invalid_range("worker count must be at least 1"));
    }

    let effective = (workers as u64).min(upper_bound);
    let base = upper_bound / effective;

    let chunks = (0..effective)
        .map(|i| {
            let start = i * base + 1;
            let end = if i + 1 == effective { upper_bound } else { (i + 1) * base };
            Chunk { start, end }
        })
        .collect();

    Ok(chunks)
}
