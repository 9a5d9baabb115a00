// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use sg_fhe::FheError;
use sg_fhe_params::ParamsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecryptError {
    /// A decrypted count is negative or above the plausible ceiling. Points at
    /// a corrupted ciphertext or a plaintext modulus too small for the run.
    #[error("Decrypted value {value} in slot {slot} ({variant}) is outside [0, {ceiling}]")]
    Range {
        variant: String,
        slot: usize,
        value: i64,
        ceiling: u64,
    },

    #[error("Variant {variant} decrypted to {carriers} carriers out of {total} observed calls")]
    Inconsistent {
        variant: String,
        carriers: u64,
        total: u64,
    },

    #[error("Aggregate has {actual} slots, the panel needs {expected}")]
    Shape { expected: usize, actual: usize },

    #[error(transparent)]
    Parameter(#[from] ParamsError),

    #[error(transparent)]
    Fhe(#[from] FheError),
}
