// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Constants for BFV presets
//!
//! This module contains all hardcoded values used in preset definitions.
//! Every moduli list below is made of primes congruent to 1 modulo `2 * DEGREE`.

/// Plaintext modulus shared by every preset.
///
/// Counts are decoded in centered form, so the largest representable count is
/// `(PLAINTEXT_MODULUS - 1) / 2`.
pub const PLAINTEXT_MODULUS: u64 = 1032193;

/// Insecure preset constants (degree 512) - DO NOT USE IN PRODUCTION
pub mod insecure_512 {
    pub const DEGREE: usize = 512;
    pub const MODULI: &[u64] = &[0xffffee001, 0xffffc4001];
}

/// Secure preset constants (degree 4096)
pub mod secure_4096 {
    pub const DEGREE: usize = 4096;
    pub const MODULI: &[u64] = &[0x3FFFFFFF000001, 0xffffee001];
}

/// Secure preset constants (degree 8192)
pub mod secure_8192 {
    pub const DEGREE: usize = 8192;
    pub const MODULI: &[u64] = &[
        0x0008000000820001,
        0x0010000000060001,
        0x00100000003e0001,
        0x00100000006e0001,
    ];
}

/// Inputs of the noise budget estimate
pub mod noise {
    /// Bound B on the encryption error distribution (CBD with σ≈3.2)
    pub const ERROR_BOUND: f64 = 20.0;
    /// Budget kept in reserve for the additions of the aggregation fold
    pub const ADDITION_MARGIN_BITS: f64 = 10.0;
    /// Headroom a ciphertext must keep to still decrypt correctly
    pub const MIN_REMAINING_BITS: f64 = 1.0;
}

/// Largest log2(q) per ring degree for 128-bit security, ternary secrets
/// (HomomorphicEncryption.org security standard, table 1).
pub const MAX_LOG_Q_128: &[(usize, f64)] = &[
    (1024, 27.0),
    (2048, 54.0),
    (4096, 109.0),
    (8192, 218.0),
    (16384, 438.0),
    (32768, 881.0),
];
