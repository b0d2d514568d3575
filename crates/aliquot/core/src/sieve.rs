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

//! Prime Sieve Generator
//!
//! Builds the read-only prime table every worker trial-divides against.
//! The batch only ever sieves up to `ceil(sqrt(N)) + 1`, never up to `N`.

use crate::error::{AliquotError, AliquotResult};
use tracing::debug;

/// Ascending, deduplicated primes in `[2, limit]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeTable {
    primes: Vec<u64>,
    limit: u64,
}

impl PrimeTable {
    /// Largest limit any `u64` range can need, `required_bound(u64::MAX)`
    pub const MAX_LIMIT: u64 = (1 << 32) + 1;

    /// Sieve of Eratosthenes over `[0, limit]`
    pub fn sieve(limit: i64) -> AliquotResult<Self> {
        if limit < 0 {
            return Err(AliquotError::invalid_bound(limit, "sieve limit must not be negative"));
        }
        if (limit as u64) > Self::MAX_LIMIT {
            return Err(AliquotError::invalid_bound(limit, format!("sieve limit must not exceed {}", Self::MAX_LIMIT)));
        }
        if limit < 2 {
            return Ok(Self { primes: Vec::new(), limit: limit as u64 });
        }

        let size = usize::try_from(limit)
            .ok()
            .and_then(|l| l.checked_add(1))
            .ok_or_else(|| AliquotError::invalid_bound(limit, "sieve limit exceeds addressable memory"))?;

        let mut mask = Vec::new();
        mask.try_reserve_exact(size).map_err(|e| AliquotError::invalid_bound(limit, format!("cannot allocate sieve of {size} entries: {e}")))?;
        mask.resize(size, true);
        mask[0] = false;
        mask[1] = false;

        let last = size - 1;
        for i in 2..=last.isqrt() {
            if !mask[i] {
                continue;
            }
            // smaller multiples were already struck out by smaller factors
            for multiple in (i * i..=last).step_by(i) {
                mask[multiple] = false;
            }
        }

        let primes: Vec<u64> = mask.iter().enumerate().filter(|(_, is_prime)| **is_prime).map(|(i, _)| i as u64).collect();
        debug!(limit, count = primes.len(), "sieve complete");

        Ok(Self { primes, limit: limit as u64 })
    }

    /// Table large enough to factor every integer in `[1, upper_bound]`
    pub fn for_upper_bound(upper_bound: u64) -> AliquotResult<Self> {
        let bound = Self::required_bound(upper_bound);
        Self::sieve(bound as i64)
    }

    /// `ceil(sqrt(n)) + 1`, the sieve limit a batch over `[1, n]` needs
    pub fn required_bound(n: u64) -> u64 {
        let root = n.isqrt();
        let ceil = if root * root == n { root } else { root + 1 };
        ceil + 1
    }

    /// Whether trial division against this table fully factors `n`
    pub fn covers(&self, n: u64) -> bool {
        n.isqrt() <= self.limit
    }

    pub fn primes(&self) -> &[u64] {
        &self.primes
    }

    pub fn len(&self) -> usize {
        self.primes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    /// Inclusive upper limit the table was sieved to
    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.primes.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_limits() {
        assert!(PrimeTable::sieve(0).unwrap().is_empty());
        assert!(PrimeTable::sieve(1).unwrap().is_empty());
        assert_eq!(PrimeTable::sieve(2).unwrap().primes(), &[2]);
        assert_eq!(PrimeTable::sieve(3).unwrap().primes(), &[2, 3]);
    }

    #[test]
    fn test_primes_up_to_fifty() {
        let table = PrimeTable::sieve(50).unwrap();
        assert_eq!(table.primes(), &[2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47]);
        assert_eq!(table.limit(), 50);
    }

    #[test]
    fn test_limit_is_inclusive() {
        let table = PrimeTable::sieve(97).unwrap();
        assert_eq!(table.primes().last(), Some(&97));
        assert_eq!(table.len(), 25);
    }

    #[test]
    fn test_negative_limit_is_rejected() {
        let err = PrimeTable::sieve(-1).unwrap_err();
        assert!(matches!(err, AliquotError::InvalidBound { bound: -1, .. }));
    }

    #[test]
    fn test_limit_beyond_any_u64_range_is_rejected() {
        let bound = (PrimeTable::MAX_LIMIT + 1) as i64;
        assert!(matches!(PrimeTable::sieve(bound), Err(AliquotError::InvalidBound { bound: b, .. }) if b == bound));
        assert!(matches!(PrimeTable::sieve(1 << 50), Err(AliquotError::InvalidBound { .. })));
        assert!(matches!(PrimeTable::sieve(i64::MAX), Err(AliquotError::InvalidBound { .. })));
    }

    #[test]
    fn test_prime_count_below_ten_thousand() {
        assert_eq!(PrimeTable::sieve(10_000).unwrap().len(), 1229);
    }

    #[test]
    fn test_required_bound() {
        assert_eq!(PrimeTable::required_bound(1), 2);
        assert_eq!(PrimeTable::required_bound(16), 5);
        assert_eq!(PrimeTable::required_bound(17), 6);
        assert_eq!(PrimeTable::required_bound(100_000), 318);
        assert_eq!(PrimeTable::required_bound(u64::MAX), PrimeTable::MAX_LIMIT);
    }

    #[test]
    fn test_covers() {
        let table = PrimeTable::for_upper_bound(1_000).unwrap();
        assert!(table.covers(1_000));
        assert!(table.covers(1_089));
        assert!(!table.covers(10_000));
    }
}
