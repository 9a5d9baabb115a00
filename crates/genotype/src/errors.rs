// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenotypeError {
    /// The same sample was called twice for one variant. There is no way to
    /// tell which call is the ground truth, so the whole encode fails.
    #[error("Sample '{sample_id}' appears more than once for variant {variant}")]
    DuplicateSample { variant: String, sample_id: String },

    #[error("Invalid variant {name}: {reason}")]
    InvalidVariant { name: String, reason: String },

    #[error("Variant {0} is defined twice in the panel")]
    DuplicateVariant(String),

    #[error("Cannot parse genotype '{0}'")]
    InvalidGenotype(String),

    #[error("Invalid plaintext vector: {0}")]
    InvalidVector(String),
}

/// A variant with no non-missing call anywhere: its frequency is undefined.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No observed genotype for variant {variant}; frequency is undefined")]
pub struct ZeroDenominatorError {
    pub variant: String,
}
