// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Plaintext analysis of a single dataset, with no cryptography involved.

use crate::errors::GenotypeError;
use crate::result::{AggregateResult, VariantFrequency};
use crate::variant::VariantPanel;
use crate::vector::PlaintextVector;

/// Computes carrier frequencies straight from one party's plaintext counts.
pub fn local_frequencies(
    vector: &PlaintextVector,
    panel: &VariantPanel,
) -> Result<AggregateResult, GenotypeError> {
    if vector.len() != panel.slot_count() {
        return Err(GenotypeError::InvalidVector(format!(
            "expected {} slots for the panel, got {}",
            panel.slot_count(),
            vector.len()
        )));
    }

    let variants = panel
        .iter()
        .zip(vector.pairs())
        .map(|(variant, pair)| VariantFrequency::new(variant, pair.carriers, pair.total))
        .collect();

    Ok(AggregateResult {
        contributors: 1,
        variants,
    })
}
