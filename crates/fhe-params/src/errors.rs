// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::presets::SecurityLevel;
use thiserror::Error;

/// Unsupportable cryptographic parameters.
///
/// Raised before any genotype data is touched; a run that hits one of these
/// must abort.
#[derive(Error, Debug)]
pub enum ParamsError {
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Unknown security level: {0}")]
    UnknownSecurityLevel(String),

    #[error(
        "Multiplicative depth {requested} is not supportable at security level {level}: \
         the largest preset supports depth {supported:?}"
    )]
    UnsupportedDepth {
        level: SecurityLevel,
        requested: usize,
        supported: Option<usize>,
    },

    #[error("Preset {preset} has log2(q)={log_q:.1}, above the {limit:.1} bit bound for degree {degree}")]
    InsecureModulus {
        preset: &'static str,
        degree: usize,
        log_q: f64,
        limit: f64,
    },

    #[error("Sanity ceiling {ceiling} does not fit the plaintext space (largest decodable count is {limit})")]
    CeilingTooLarge { ceiling: u64, limit: u64 },

    #[error("Sanity ceiling must be positive")]
    ZeroCeiling,

    #[error("Failed to build BFV parameters: {0}")]
    Build(#[from] fhe::Error),
}
