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

//! Residue-Class Prime Density
//!
//! Walks the first `K` primes and tracks, for every residue class `a` coprime
//! to the modulus `m`, the share of primes seen so far that are `a (mod m)`.
//! By Dirichlet's theorem each share tends to `1 / phi(m)`.
//!
//! Samples are produced lazily, one per prime (or one per `stride` primes), so
//! memory stays at `O(K + phi(m))` instead of holding the full history.

use crate::error::{AliquotError, AliquotResult};
use crate::sieve::PrimeTable;
use num_integer::Integer;
use tracing::debug;

/// Running shares after the `index`-th prime
#[derive(Debug, Clone, PartialEq)]
pub struct DensitySample {
    /// 1-based position of `prime` in the sequence of primes
    pub index: usize,
    pub prime: u64,
    /// `(residue, count / index)` for every residue coprime to the modulus
    pub ratios: Vec<(u64, f64)>,
}

/// Lazy stream of [`DensitySample`]s
#[derive(Debug, Clone)]
pub struct ResidueDensity {
    modulus: u64,
    residues: Vec<u64>,
    counts: Vec<u64>,
    primes: Vec<u64>,
    position: usize,
    stride: usize,
}

impl ResidueDensity {
    /// Stream over the first `prime_count` primes, reduced modulo `modulus`
    pub fn new(modulus: u64, prime_count: usize) -> AliquotResult<Self> {
        if modulus < 2 {
            return Err(AliquotError::invalid_range("modulus must be at least 2"));
        }
        if prime_count < 1 {
            return Err(AliquotError::invalid_range("prime count must be at least 1"));
        }

        let residues: Vec<u64> = (1..modulus).filter(|a| a.gcd(&modulus) == 1).collect();

        let bound = nth_prime_upper_bound(prime_count);
        let bound = i64::try_from(bound).map_err(|_| AliquotError::invalid_range(format!("prime count {prime_count} is too large")))?;
        let table = PrimeTable::sieve(bound)?;
        if table.len() < prime_count {
            return Err(AliquotError::invalid_bound(bound, format!("sieve produced only {} of {prime_count} primes", table.len())));
        }

        let mut primes = table.primes().to_vec();
        primes.truncate(prime_count);
        debug!(modulus, classes = residues.len(), primes = primes.len(), "density stream ready");

        Ok(Self {
            modulus,
            counts: vec![0; residues.len()],
            residues,
            primes,
            position: 0,
            stride: 1,
        })
    }

    /// Only yield every `stride`-th sample, plus the final one
    pub fn with_stride(mut self, stride: usize) -> AliquotResult<Self> {
        if stride < 1 {
            return Err(AliquotError::invalid_range("stride must be at least 1"));
        }
        self.stride = stride;
        Ok(self)
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Residues coprime to the modulus, ascending
    pub fn residues(&self) -> &[u64] {
        &self.residues
    }

    fn sample(&self, prime: u64) -> DensitySample {
        let index = self.position;
        let ratios = self.residues.iter().zip(&self.counts).map(|(&residue, &count)| (residue, count as f64 / index as f64)).collect();
        DensitySample { index, prime, ratios }
    }
}

impl Iterator for ResidueDensity {
    type Item = DensitySample;

    fn next(&mut self) -> Option<Self::Item> {
        while self.position < self.primes.len() {
            let prime = self.primes[self.position];
            self.position += 1;

            if let Ok(slot) = self.residues.binary_search(&(prime % self.modulus)) {
                self.counts[slot] += 1;
            }

            if self.position % self.stride == 0 || self.position == self.primes.len() {
                return Some(self.sample(prime));
            }
        }
        None
    }
}

/// Upper bound for the `k`-th prime, `k (ln k + ln ln k)` for `k >= 6`
pub fn nth_prime_upper_bound(k: usize) -> u64 {
    if k < 6 {
        return 13;
    }
    let k = k as f64;
    (k * (k.ln() + k.ln().ln())).ceil() as u64
}
