// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::errors::GenotypeError;
use crate::record::GenotypeRecord;
use crate::variant::{VariantPanel, PANEL_SIZE};
use crate::vector::{PlaintextVector, SlotPair};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Encodes a party's genotype calls into its plaintext count vector.
///
/// Per variant, every non-missing call counts toward the total and every
/// heterozygous or homozygous call counts once toward the carriers (presence,
/// not dosage). Samples without a record for a variant are left out of both
/// counts rather than treated as non-carriers. Records for variants outside the
/// panel are skipped.
pub fn encode(
    records: &[GenotypeRecord],
    panel: &VariantPanel,
) -> Result<PlaintextVector, GenotypeError> {
    let mut pairs = [SlotPair::default(); PANEL_SIZE];
    let mut seen: [HashSet<&str>; PANEL_SIZE] = Default::default();
    let mut skipped = 0usize;

    for record in records {
        let Some(index) = panel.index_of(&record.variant) else {
            skipped += 1;
            continue;
        };

        if !seen[index].insert(record.sample_id.as_str()) {
            return Err(GenotypeError::DuplicateSample {
                variant: record.variant.clone(),
                sample_id: record.sample_id.clone(),
            });
        }

        let pair = &mut pairs[index];
        if record.zygosity.is_observed() {
            pair.total += 1;
        }
        if record.zygosity.is_carrier() {
            pair.carriers += 1;
        }
    }

    if skipped > 0 {
        warn!(skipped, "Ignored genotype records for variants outside the panel");
    }
    debug!(records = records.len(), "Encoded genotype records");

    Ok(PlaintextVector::from_pairs(&pairs))
}
