// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::keys::PublicBundle;
use crate::party::PartyTag;
use crate::FheError;
use fhe::bfv::{BfvParameters, Ciphertext};
use fhe_traits::{DeserializeParametrized, Serialize};
use serde::{Deserialize, Serialize as SerdeSerialize};
use sg_fhe_params::BfvPreset;
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::Arc;

/// A sequence of per-slot ciphertexts under one parameter set.
pub trait EncryptedSlots {
    fn params(&self) -> &Arc<BfvParameters>;
    fn slots(&self) -> &[Ciphertext];
}

/// One party's encrypted count vector.
#[derive(Clone)]
pub struct CiphertextVector {
    party: PartyTag,
    preset: BfvPreset,
    params: Arc<BfvParameters>,
    slots: Vec<Ciphertext>,
}

#[derive(SerdeSerialize, Deserialize)]
struct CiphertextVectorData {
    preset: String,
    party: PartyTag,
    slots: Vec<Vec<u8>>,
    digest: Vec<u8>,
}

fn digest_slots(preset: &str, party: &PartyTag, slots: &[Vec<u8>]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(preset.as_bytes());
    hasher.update(party.as_str().as_bytes());
    for slot in slots {
        hasher.update((slot.len() as u64).to_le_bytes());
        hasher.update(slot);
    }
    hasher.finalize().to_vec()
}

impl CiphertextVector {
    pub(crate) fn new(
        party: PartyTag,
        preset: BfvPreset,
        params: Arc<BfvParameters>,
        slots: Vec<Ciphertext>,
    ) -> Self {
        Self {
            party,
            preset,
            params,
            slots,
        }
    }

    pub fn party(&self) -> &PartyTag {
        &self.party
    }

    pub fn preset(&self) -> BfvPreset {
        self.preset
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Consumes the vector, yielding its slots for homomorphic evaluation.
    pub fn into_slots(self) -> Vec<Ciphertext> {
        self.slots
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, FheError> {
        let slots: Vec<Vec<u8>> = self.slots.iter().map(|ct| ct.to_bytes()).collect();
        let digest = digest_slots(self.preset.name(), &self.party, &slots);
        Ok(bincode::serialize(&CiphertextVectorData {
            preset: self.preset.name().to_string(),
            party: self.party.clone(),
            slots,
            digest,
        })?)
    }

    /// Decodes a ciphertext vector received from a party. Fails on a digest
    /// mismatch or when it was produced under another preset than `bundle`.
    pub fn from_bytes(bytes: &[u8], bundle: &PublicBundle) -> Result<Self, FheError> {
        let CiphertextVectorData {
            preset,
            party,
            slots,
            digest,
        } = bincode::deserialize(bytes)?;

        if digest_slots(&preset, &party, &slots) != digest {
            return Err(FheError::Integrity {
                party: party.to_string(),
            });
        }

        let preset = BfvPreset::from_name(&preset)?;
        if preset != bundle.preset() {
            return Err(FheError::ParameterMismatch(format!(
                "ciphertext from '{party}' uses {preset}, expected {}",
                bundle.preset()
            )));
        }

        let params = bundle.params().clone();
        let slots = slots
            .iter()
            .map(|bytes| Ciphertext::from_bytes(bytes, &params))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(party, preset, params, slots))
    }

    /// Short hex digest of the ciphertext bytes, safe to log.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for ct in &self.slots {
            hasher.update(ct.to_bytes());
        }
        hex::encode(&hasher.finalize()[..8])
    }
}

impl EncryptedSlots for CiphertextVector {
    fn params(&self) -> &Arc<BfvParameters> {
        &self.params
    }

    fn slots(&self) -> &[Ciphertext] {
        &self.slots
    }
}

impl fmt::Debug for CiphertextVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CiphertextVector")
            .field("party", &self.party)
            .field("preset", &self.preset)
            .field("slots", &self.slots.len())
            .finish()
    }
}
