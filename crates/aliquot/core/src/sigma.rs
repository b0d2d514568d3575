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

//! Arithmetic Function Evaluator
//!
//! `sigma(n)` is multiplicative, so it is evaluated from the factorization as
//! the product of `(p^(e+1) - 1) / (p - 1)` over every `p^e`. All arithmetic is
//! checked `u128`; anything that does not fit is reported against `n`.

use crate::error::{AliquotError, AliquotResult};
use crate::factor::Factorization;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Sum of all positive divisors of the factorized integer
pub fn divisor_sum(factorization: &Factorization) -> AliquotResult<u128> {
    let n = factorization.n();
    let mut sigma: u128 = 1;
    let mut previous = 1;

    for power in factorization.iter() {
        if power.exponent == 0 || power.prime <= previous {
            return Err(AliquotError::malformed(n, format!("unexpected factor {}^{}", power.prime, power.exponent)));
        }
        previous = power.prime;

        let p = u128::from(power.prime);
        let contribution = power
            .exponent
            .checked_add(1)
            .and_then(|e| p.checked_pow(e))
            .map(|pe| (pe - 1) / (p - 1))
            .ok_or(AliquotError::ArithmeticOverflow { n })?;
        sigma = sigma.checked_mul(contribution).ok_or(AliquotError::ArithmeticOverflow { n })?;
    }

    Ok(sigma)
}

/// `sigma(n) - n`, the sum of the proper divisors
pub fn aliquot_sum(factorization: &Factorization) -> AliquotResult<u128> {
    let n = factorization.n();
    let sigma = divisor_sum(factorization)?;
    sigma
        .checked_sub(u128::from(n))
        .ok_or_else(|| AliquotError::malformed(n, format!("divisor sum {sigma} is smaller than n")))
}

/// Deficient, perfect or abundant, by comparing the aliquot sum with `n`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Deficient,
    Perfect,
    Abundant,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Deficient => write!(f, "deficient"),
            Classification::Perfect => write!(f, "perfect"),
            Classification::Abundant => write!(f, "abundant"),
        }
    }
}

pub fn classify(n: u64, aliquot: u128) -> Classification {
    match aliquot.cmp(&u128::from(n)) {
        Ordering::Less => Classification::Deficient,
        Ordering::Equal => Classification::Perfect,
        Ordering::Greater => Classification::Abundant,
    }
}
