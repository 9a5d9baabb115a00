// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use sg_fhe_params::ParamsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FheError {
    #[error("Expected {expected} plaintext slots, got {actual}")]
    Shape { expected: usize, actual: usize },

    #[error("Slot {slot} holds {value}, above the largest encodable count {limit}")]
    Range { slot: usize, value: u64, limit: u64 },

    #[error(transparent)]
    Parameter(#[from] ParamsError),

    #[error("Parameter mismatch: {0}")]
    ParameterMismatch(String),

    #[error("Ciphertext integrity check failed for party '{party}'")]
    Integrity { party: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("BFV scheme error: {0}")]
    Scheme(#[from] fhe::Error),

    #[error("Shared RNG lock is poisoned")]
    RngPoisoned,
}
