// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use sg_fhe::{BfvPreset, PartyTag};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregateError {
    #[error("Party '{party}' submitted {actual} slots, expected {expected}")]
    Shape {
        party: PartyTag,
        expected: usize,
        actual: usize,
    },

    #[error("Party '{0}' has already contributed to this aggregate")]
    DuplicateParty(PartyTag),

    #[error("Party '{party}' encrypted under {actual}, the run uses {expected}")]
    ParameterMismatch {
        party: PartyTag,
        expected: BfvPreset,
        actual: BfvPreset,
    },

    #[error("Cannot combine aggregates: {0}")]
    Incompatible(String),

    #[error("Summing {summands} ciphertexts exceeds the noise budget (max {max})")]
    NoiseBudgetExhausted { summands: u64, max: u64 },

    #[error("Aggregator is sealed; no further contributions are accepted")]
    Sealed,
}
