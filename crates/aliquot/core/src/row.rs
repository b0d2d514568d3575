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

//! Result Row Formatter

use crate::error::AliquotResult;
use crate::factor::{Factorization, factorize};
use crate::sieve::PrimeTable;
use crate::sigma::aliquot_sum;
use std::fmt;

/// Joins the prime powers of a factorization label
pub const FACTOR_SEPARATOR: &str = " × ";

/// Column names of the output table, in order
pub const HEADER: [&str; 3] = ["n", "aliquotSum", "factorization"];

/// One output row: `n`, `sigma(n) - n` and the factorization label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub n: u64,
    pub aliquot_sum: u128,
    pub factorization: String,
}

impl ResultRow {
    /// Factor `n`, evaluate its aliquot sum and render the label
    pub fn compute(n: u64, table: &PrimeTable) -> AliquotResult<Self> {
        let factorization = factorize(n, table)?;
        let aliquot_sum = aliquot_sum(&factorization)?;
        Ok(Self {
            n,
            aliquot_sum,
            factorization: format_factorization(&factorization),
        })
    }

    /// Fields in [`HEADER`] order
    pub fn to_record(&self) -> [String; 3] {
        [self.n.to_string(), self.aliquot_sum.to_string(), self.factorization.clone()]
    }
}

/// Render `"1"` for the empty factorization, otherwise `p` or `p^e` per factor
pub fn format_factorization(factorization: &Factorization) -> String {
    if factorization.is_empty() {
        return "1".to_string();
    }

    factorization
        .iter()
        .map(|power| match power.exponent {
            1 => power.prime.to_string(),
            e => format!("{}^{}", power.prime, e),
        })
        .collect::<Vec<_>>()
        .join(FACTOR_SEPARATOR)
}

impl fmt::Display for Factorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_factorization(self))
    }
}
