// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::ProtocolPhase;
use sg_aggregator::AggregateError;
use sg_decryptor::DecryptError;
use sg_fhe::{FheError, PartyTag};
use sg_genotype::GenotypeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Cannot move from {from} to {to}")]
    InvalidTransition {
        from: ProtocolPhase,
        to: ProtocolPhase,
    },

    #[error("Party '{party}' could not encode its records: {source}")]
    Encode {
        party: PartyTag,
        #[source]
        source: GenotypeError,
    },

    #[error("Party '{party}' could not encrypt its counts: {source}")]
    Encrypt {
        party: PartyTag,
        #[source]
        source: FheError,
    },

    #[error("Run accepts at most {max} parties, {requested} requested")]
    TooManyParties { max: usize, requested: usize },

    #[error(transparent)]
    Keys(#[from] FheError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error(transparent)]
    Decrypt(#[from] DecryptError),
}
