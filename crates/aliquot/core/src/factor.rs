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

//! Factorization Engine
//!
//! Trial division against a shared [`PrimeTable`]. Division stops as soon as
//! `p * p` exceeds the residual; whatever is left above one is itself prime.
//! That shortcut is only sound when the table reaches `sqrt(n)`, so tables
//! that do not cover `n` are rejected up front.

use crate::error::{AliquotError, AliquotResult};
use crate::sieve::PrimeTable;

/// One `prime^exponent` factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimePower {
    pub prime: u64,
    pub exponent: u32,
}

impl PrimePower {
    pub fn new(prime: u64, exponent: u32) -> Self {
        Self { prime, exponent }
    }
}

/// Prime-power decomposition of `n`, primes strictly ascending
///
/// The empty decomposition stands for `n = 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factorization {
    n: u64,
    powers: Vec<PrimePower>,
}

impl Factorization {
    /// Build a factorization from caller-supplied pairs, checking every invariant
    ///
    /// Rejects primes below two, zero exponents, primes that are not strictly
    /// ascending and pairs whose product differs from `n`.
    pub fn from_pairs(n: u64, pairs: impl IntoIterator<Item = (u64, u32)>) -> AliquotResult<Self> {
        let powers: Vec<PrimePower> = pairs.into_iter().map(|(prime, exponent)| PrimePower { prime, exponent }).collect();

        let mut previous = 1;
        for power in &powers {
            if power.prime < 2 {
                return Err(AliquotError::malformed(n, format!("{} is not a prime", power.prime)));
            }
            if power.exponent == 0 {
                return Err(AliquotError::malformed(n, format!("exponent of {} must be at least 1", power.prime)));
            }
            if power.prime <= previous {
                return Err(AliquotError::malformed(n, format!("prime {} does not ascend past {}", power.prime, previous)));
            }
            previous = power.prime;
        }

        let factorization = Self { n, powers };
        match factorization.product() {
            Some(product) if product == n => Ok(factorization),
            Some(product) => Err(AliquotError::malformed(n, format!("factors multiply to {product}"))),
            None => Err(AliquotError::malformed(n, "factors multiply past u64")),
        }
    }

    /// The integer this factorization decomposes
    pub fn n(&self) -> u64 {
        self.n
    }

    pub fn powers(&self) -> &[PrimePower] {
        &self.powers
    }

    pub fn iter(&self) -> impl Iterator<Item = &PrimePower> {
        self.powers.iter()
    }

    /// `true` only for `n = 1`
    pub fn is_empty(&self) -> bool {
        self.powers.is_empty()
    }

    /// Number of distinct prime factors
    pub fn len(&self) -> usize {
        self.powers.len()
    }

    /// Multiply the factors back out, `None` on overflow
    pub fn product(&self) -> Option<u64> {
        self.powers
            .iter()
            .try_fold(1u64, |acc, power| power.prime.checked_pow(power.exponent).and_then(|pp| acc.checked_mul(pp)))
    }

    /// `n` is prime exactly when it has a single factor with exponent one
    pub fn is_prime(&self) -> bool {
        matches!(self.powers.as_slice(), [PrimePower { exponent: 1, .. }])
    }
}

/// Factor `n` by trial division against `table`
pub fn factorize(n: u64, table: &PrimeTable) -> AliquotResult<Factorization> {
    if n == 0 {
        return Err(AliquotError::invalid_range("cannot factor 0"));
    }
    if !table.covers(n) {
        return Err(AliquotError::invalid_bound(
            table.limit() as i64,
            format!("prime table does not reach sqrt({n}), at least {} is required", n.isqrt()),
        ));
    }

    let mut powers = Vec::new();
    let mut residual = n;

    for p in table.iter() {
        if p.checked_mul(p).is_none_or(|square| square > residual) {
            break;
        }
        if residual % p != 0 {
            continue;
        }

        let mut exponent = 0;
        while residual % p == 0 {
            residual /= p;
            exponent += 1;
        }
        powers.push(PrimePower { prime: p, exponent });
    }

    if residual > 1 {
        powers.push(PrimePower { prime: residual, exponent: 1 });
    }

    let factorization = Factorization { n, powers };
    debug_assert_eq!(factorization.product(), Some(n));
    Ok(factorization)
}

/// Factor `n` by dividing out 2 and then every odd candidate, no table needed
///
/// Uses constant memory. Slower than [`factorize`] when many values share a
/// table, but suited to one-off values whose square root is too large to sieve.
pub fn factorize_unsieved(n: u64) -> AliquotResult<Factorization> {
    if n == 0 {
        return Err(AliquotError::invalid_range("cannot factor 0"));
    }

    let mut powers = Vec::new();
    let mut residual = n;
    let mut divide_out = |residual: &mut u64, p: u64| {
        let mut exponent = 0;
        while *residual % p == 0 {
            *residual /= p;
            exponent += 1;
        }
        if exponent > 0 {
            powers.push(PrimePower { prime: p, exponent });
        }
    };

    divide_out(&mut residual, 2);
    let mut candidate = 3u64;
    while candidate.checked_mul(candidate).is_some_and(|square| square <= residual) {
        divide_out(&mut residual, candidate);
        candidate += 2;
    }

    if residual > 1 {
        powers.push(PrimePower { prime: residual, exponent: 1 });
    }

    let factorization = Factorization { n, powers };
    debug_assert_eq!(factorization.product(), Some(n));
    Ok(factorization)
}
