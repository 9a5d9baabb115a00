// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::errors::GenotypeError;
use crate::variant::SLOTS_PER_VARIANT;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Carrier and total-observed counts of one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotPair {
    pub carriers: u64,
    pub total: u64,
}

/// A party's local counts, laid out `[carriers_0, total_0, carriers_1, total_1, ...]`.
///
/// Holds raw local statistics: it is never transmitted and is wiped when dropped.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PlaintextVector {
    slots: Vec<u64>,
}

impl PlaintextVector {
    pub(crate) fn from_pairs(pairs: &[SlotPair]) -> Self {
        let slots = pairs.iter().flat_map(|p| [p.carriers, p.total]).collect();
        Self { slots }
    }

    /// Builds a vector from externally supplied slots, enforcing
    /// `total >= carriers` for every variant.
    pub fn from_slots(slots: Vec<u64>) -> Result<Self, GenotypeError> {
        if slots.is_empty() || slots.len() % SLOTS_PER_VARIANT != 0 {
            return Err(GenotypeError::InvalidVector(format!(
                "expected a positive multiple of {} slots, got {}",
                SLOTS_PER_VARIANT,
                slots.len()
            )));
        }
        for (index, pair) in slots.chunks_exact(SLOTS_PER_VARIANT).enumerate() {
            if pair[0] > pair[1] {
                return Err(GenotypeError::InvalidVector(format!(
                    "variant {index} has {} carriers but only {} observed calls",
                    pair[0], pair[1]
                )));
            }
        }
        Ok(Self { slots })
    }

    pub fn slots(&self) -> &[u64] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn variant_count(&self) -> usize {
        self.slots.len() / SLOTS_PER_VARIANT
    }

    pub fn pair(&self, variant_index: usize) -> Option<SlotPair> {
        let start = variant_index * SLOTS_PER_VARIANT;
        let pair = self.slots.get(start..start + SLOTS_PER_VARIANT)?;
        Some(SlotPair {
            carriers: pair[0],
            total: pair[1],
        })
    }

    pub fn pairs(&self) -> impl Iterator<Item = SlotPair> + '_ {
        self.slots
            .chunks_exact(SLOTS_PER_VARIANT)
            .map(|pair| SlotPair {
                carriers: pair[0],
                total: pair[1],
            })
    }
}
