// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Noise budget estimation for BFV ciphertexts.
//!
//! The estimate is a heuristic in bits, in the spirit of the bounds used by the
//! parameter search: a fresh public-key encryption carries noise of roughly
//! `B * (2n + 1)`, decryption stays correct while the noise is below
//! `q / (2t)`, and one multiplication grows the noise by about `n * t`.

use crate::constants::noise::{ADDITION_MARGIN_BITS, ERROR_BOUND, MIN_REMAINING_BITS};
use crate::presets::BfvParamSet;
use serde::{Deserialize, Serialize};

/// Static noise figures of a parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseEstimate {
    /// Sum of log2(q_i) over the ciphertext moduli
    pub log_q: f64,
    /// Headroom of a freshly encrypted ciphertext
    pub fresh_budget_bits: f64,
    /// Approximate budget consumed by one ciphertext-ciphertext multiplication
    pub multiplication_cost_bits: f64,
    /// Largest multiplicative depth the set supports while keeping the addition margin,
    /// `None` when even an addition-only circuit does not fit
    pub max_depth: Option<usize>,
}

impl NoiseEstimate {
    pub fn for_param_set(set: &BfvParamSet) -> Self {
        let n = set.degree as f64;
        let log_q: f64 = set.moduli.iter().map(|q| (*q as f64).log2()).sum();
        let log_t = (set.plaintext_modulus as f64).log2();
        let fresh_noise_bits = (ERROR_BOUND * (2.0 * n + 1.0)).log2();

        let fresh_budget_bits = log_q - log_t - fresh_noise_bits - 1.0;
        let multiplication_cost_bits = n.log2() + log_t + 2.0;

        let usable = fresh_budget_bits - ADDITION_MARGIN_BITS;
        let max_depth = if usable < 0.0 {
            None
        } else {
            Some((usable / multiplication_cost_bits).floor() as usize)
        };

        Self {
            log_q,
            fresh_budget_bits,
            multiplication_cost_bits,
            max_depth,
        }
    }

    pub fn supports_depth(&self, depth: usize) -> bool {
        matches!(self.max_depth, Some(max) if depth <= max)
    }

    /// Budget tracker for ciphertexts freshly encrypted under this set.
    pub fn budget(&self) -> NoiseBudget {
        NoiseBudget::new(self.fresh_budget_bits)
    }
}

/// Tracks the remaining noise budget of a sum of fresh ciphertexts.
///
/// Adding `k` ciphertexts of equal noise grows the noise by `log2(k)` bits, so
/// the budget of an aggregate only depends on how many fresh ciphertexts went
/// into it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseBudget {
    fresh_bits: f64,
}

impl NoiseBudget {
    pub fn new(fresh_bits: f64) -> Self {
        Self { fresh_bits }
    }

    pub fn fresh_bits(&self) -> f64 {
        self.fresh_bits
    }

    /// Remaining budget of a sum of `summands` fresh ciphertexts.
    pub fn remaining_after(&self, summands: u64) -> f64 {
        if summands <= 1 {
            return self.fresh_bits;
        }
        self.fresh_bits - (summands as f64).log2()
    }

    pub fn can_sum(&self, summands: u64) -> bool {
        self.remaining_after(summands) >= MIN_REMAINING_BITS
    }

    /// Largest number of fresh ciphertexts that can be summed and still decrypt.
    pub fn max_summands(&self) -> u64 {
        let exponent = self.fresh_bits - MIN_REMAINING_BITS;
        if exponent < 0.0 {
            return 0;
        }
        if exponent >= 63.0 {
            return u64::MAX;
        }
        exponent.exp2().floor() as u64
    }
}
