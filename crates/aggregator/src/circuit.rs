// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::AggregateError;
use fhe::bfv::{BfvParameters, Ciphertext};
use rayon::prelude::*;
use sg_fhe::{BfvPreset, CiphertextVector, EncryptedSlots, PartyTag, PublicBundle};
use sg_fhe_params::NoiseBudget;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Slot-wise sum of the contributions of a set of parties.
///
/// An aggregate with no contributors is the identity of [`combine`]: it holds
/// no ciphertexts and every slot is taken to be zero.
#[derive(Clone)]
pub struct AggregateCiphertext {
    preset: BfvPreset,
    params: Arc<BfvParameters>,
    slot_count: usize,
    slots: Vec<Ciphertext>,
    contributors: BTreeSet<PartyTag>,
}

impl AggregateCiphertext {
    pub fn preset(&self) -> BfvPreset {
        self.preset
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn contributors(&self) -> &BTreeSet<PartyTag> {
        &self.contributors
    }

    pub fn contributor_count(&self) -> usize {
        self.contributors.len()
    }

    pub fn is_identity(&self) -> bool {
        self.contributors.is_empty()
    }
}

impl EncryptedSlots for AggregateCiphertext {
    fn params(&self) -> &Arc<BfvParameters> {
        &self.params
    }

    fn slots(&self) -> &[Ciphertext] {
        &self.slots
    }
}

impl fmt::Debug for AggregateCiphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregateCiphertext")
            .field("preset", &self.preset)
            .field("slot_count", &self.slot_count)
            .field("contributors", &self.contributors)
            .finish()
    }
}

impl AggregateCiphertext {
    /// Adds `other` into this aggregate slot by slot. All checks run before
    /// any slot is touched, so a failed merge leaves `self` unchanged.
    pub fn merge(&mut self, other: AggregateCiphertext) -> Result<(), AggregateError> {
        if self.preset != other.preset || self.params != other.params {
            return Err(AggregateError::Incompatible(format!(
                "{} and {} use different parameters",
                self.preset, other.preset
            )));
        }
        if self.slot_count != other.slot_count {
            return Err(AggregateError::Incompatible(format!(
                "{} slots vs {} slots",
                self.slot_count, other.slot_count
            )));
        }
        if let Some(party) = self.contributors.intersection(&other.contributors).next() {
            return Err(AggregateError::DuplicateParty(party.clone()));
        }

        if other.is_identity() {
            return Ok(());
        }
        if self.is_identity() {
            *self = other;
            return Ok(());
        }

        for (acc, ct) in self.slots.iter_mut().zip(other.slots.iter()) {
            *acc += ct;
        }
        self.contributors.extend(other.contributors);
        Ok(())
    }
}

/// Adds two aggregates slot by slot. Associative and commutative, with the
/// zero-contributor aggregate as identity.
pub fn combine(
    mut left: AggregateCiphertext,
    right: AggregateCiphertext,
) -> Result<AggregateCiphertext, AggregateError> {
    left.merge(right)?;
    Ok(left)
}

/// Validates party ciphertexts and sums them under one parameter set.
#[derive(Clone)]
pub struct AggregationCircuit {
    preset: BfvPreset,
    params: Arc<BfvParameters>,
    expected_slots: usize,
    budget: NoiseBudget,
}

impl AggregationCircuit {
    pub fn new(bundle: &PublicBundle, expected_slots: usize) -> Self {
        let preset = bundle.preset();
        Self {
            preset,
            params: bundle.params().clone(),
            expected_slots,
            budget: preset.noise_estimate().budget(),
        }
    }

    pub fn expected_slots(&self) -> usize {
        self.expected_slots
    }

    pub fn identity(&self) -> AggregateCiphertext {
        AggregateCiphertext {
            preset: self.preset,
            params: self.params.clone(),
            slot_count: self.expected_slots,
            slots: Vec::new(),
            contributors: BTreeSet::new(),
        }
    }

    /// Checks one party's ciphertext against the run's shape and parameters.
    pub fn validate(&self, ct: &CiphertextVector) -> Result<(), AggregateError> {
        if ct.preset() != self.preset || ct.params() != &self.params {
            return Err(AggregateError::ParameterMismatch {
                party: ct.party().clone(),
                expected: self.preset,
                actual: ct.preset(),
            });
        }
        if ct.len() != self.expected_slots {
            return Err(AggregateError::Shape {
                party: ct.party().clone(),
                expected: self.expected_slots,
                actual: ct.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_budget(&self, summands: usize) -> Result<(), AggregateError> {
        let summands = summands as u64;
        if !self.budget.can_sum(summands) {
            return Err(AggregateError::NoiseBudgetExhausted {
                summands,
                max: self.budget.max_summands(),
            });
        }
        Ok(())
    }

    /// Turns one validated party ciphertext into a single-contributor aggregate.
    pub fn lift(&self, ct: CiphertextVector) -> Result<AggregateCiphertext, AggregateError> {
        self.validate(&ct)?;
        let party = ct.party().clone();
        Ok(AggregateCiphertext {
            preset: self.preset,
            params: self.params.clone(),
            slot_count: self.expected_slots,
            slots: ct.into_slots(),
            contributors: BTreeSet::from([party]),
        })
    }

    /// Checks the whole batch before touching any ciphertext. A single bad
    /// contribution rejects the batch.
    pub(crate) fn validate_batch<'a, I>(
        &self,
        batch: I,
        already: &BTreeSet<PartyTag>,
    ) -> Result<usize, AggregateError>
    where
        I: IntoIterator<Item = &'a CiphertextVector>,
    {
        let mut seen = BTreeSet::new();
        for ct in batch {
            self.validate(ct)?;
            if already.contains(ct.party()) || !seen.insert(ct.party()) {
                return Err(AggregateError::DuplicateParty(ct.party().clone()));
            }
        }
        self.check_budget(already.len() + seen.len())?;
        Ok(seen.len())
    }

    /// Sums all party ciphertexts sequentially.
    pub fn aggregate(
        &self,
        cts: Vec<CiphertextVector>,
    ) -> Result<AggregateCiphertext, AggregateError> {
        self.validate_batch(&cts, &BTreeSet::new())?;
        let result = cts
            .into_iter()
            .try_fold(self.identity(), |acc, ct| combine(acc, self.lift(ct)?))?;
        info!(
            preset = %self.preset,
            contributors = result.contributor_count(),
            "Aggregated ciphertexts"
        );
        Ok(result)
    }

    /// Sums all party ciphertexts as a parallel tree reduction. Decrypts to the
    /// same counts as [`AggregationCircuit::aggregate`].
    pub fn aggregate_parallel(
        &self,
        cts: Vec<CiphertextVector>,
    ) -> Result<AggregateCiphertext, AggregateError> {
        self.validate_batch(&cts, &BTreeSet::new())?;
        debug!(inputs = cts.len(), "Starting parallel aggregation");
        let result = cts
            .into_par_iter()
            .map(|ct| self.lift(ct))
            .try_reduce(|| self.identity(), combine)?;
        info!(
            preset = %self.preset,
            contributors = result.contributor_count(),
            "Aggregated ciphertexts in parallel"
        );
        Ok(result)
    }
}
