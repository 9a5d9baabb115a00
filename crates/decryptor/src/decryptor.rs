// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::DecryptError;
use sg_aggregator::AggregateCiphertext;
use sg_fhe::DecryptionKey;
use sg_fhe_params::check_sanity_ceiling;
use sg_genotype::{AggregateResult, VariantFrequency, VariantPanel, SLOTS_PER_VARIANT};
use tracing::{error, info, warn};

/// Holder of the decryption key; turns the final aggregate into frequencies.
pub struct Decryptor {
    key: DecryptionKey,
    panel: VariantPanel,
    ceiling: u64,
}

impl Decryptor {
    /// `ceiling` is the largest plausible sample count across all parties.
    /// It must fit the centered plaintext range of the key's parameters.
    pub fn new(
        key: DecryptionKey,
        panel: VariantPanel,
        ceiling: u64,
    ) -> Result<Self, DecryptError> {
        check_sanity_ceiling(&key.preset().param_set(), ceiling)?;
        Ok(Self {
            key,
            panel,
            ceiling,
        })
    }

    pub fn ceiling(&self) -> u64 {
        self.ceiling
    }

    /// Maps a plaintext coefficient in `[0, t)` to its centered value.
    fn center(&self, raw: u64) -> i64 {
        let t = self.key.preset().param_set().plaintext_modulus;
        if raw > (t - 1) / 2 {
            raw as i64 - t as i64
        } else {
            raw as i64
        }
    }

    fn decrypt_counts(&self, aggregate: &AggregateCiphertext) -> Result<Vec<u64>, DecryptError> {
        if aggregate.is_identity() {
            return Ok(vec![0; aggregate.slot_count()]);
        }

        let raw = self.key.decrypt_slots(aggregate)?;
        let mut counts = Vec::with_capacity(raw.len());
        for (slot, value) in raw.into_iter().enumerate() {
            let value = self.center(value);
            if value < 0 || value as u64 > self.ceiling {
                let variant = self.variant_for_slot(slot);
                error!(variant = %variant, slot, "Decrypted value outside plausible range");
                return Err(DecryptError::Range {
                    variant,
                    slot,
                    value,
                    ceiling: self.ceiling,
                });
            }
            counts.push(value as u64);
        }
        Ok(counts)
    }

    fn variant_for_slot(&self, slot: usize) -> String {
        self.panel
            .iter()
            .nth(slot / SLOTS_PER_VARIANT)
            .map(|v| v.name.clone())
            .unwrap_or_default()
    }

    /// Decrypts the aggregate and computes one frequency per panel variant.
    ///
    /// A variant nobody observed comes back as an undefined frequency, not an
    /// error. Values that cannot be genuine counts fail the whole decryption.
    pub fn decrypt(
        &self,
        aggregate: &AggregateCiphertext,
    ) -> Result<AggregateResult, DecryptError> {
        let expected = self.panel.slot_count();
        if aggregate.slot_count() != expected {
            return Err(DecryptError::Shape {
                expected,
                actual: aggregate.slot_count(),
            });
        }

        let counts = self.decrypt_counts(aggregate)?;
        let mut variants = Vec::with_capacity(self.panel.variants().len());
        let pairs = counts.chunks_exact(SLOTS_PER_VARIANT);
        for (variant, pair) in self.panel.iter().zip(pairs) {
            let (carriers, total) = (pair[0], pair[1]);
            if carriers > total {
                error!(variant = %variant.name, "Carrier sum exceeds total sum");
                return Err(DecryptError::Inconsistent {
                    variant: variant.name.clone(),
                    carriers,
                    total,
                });
            }
            let frequency = VariantFrequency::new(variant, carriers, total);
            if !frequency.frequency.is_defined() {
                warn!(variant = %variant.name, "No observed genotypes; frequency undefined");
            }
            variants.push(frequency);
        }

        info!(contributors = aggregate.contributor_count(), "Decrypted aggregate");
        Ok(AggregateResult {
            contributors: aggregate.contributor_count(),
            variants,
        })
    }
}
