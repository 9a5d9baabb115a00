// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::ciphertext::CiphertextVector;
use crate::keys::PublicBundle;
use crate::party::PartyTag;
use crate::utils::{lock_rng, SharedRng};
use crate::FheError;
use fhe::bfv::{Encoding, Plaintext};
use fhe_traits::{FheEncoder, FheEncrypter};
use sg_genotype::PlaintextVector;
use tracing::info;

/// Encrypts party count vectors under the run's public key.
pub struct Encryptor {
    bundle: PublicBundle,
    expected_slots: usize,
    rng: SharedRng,
}

impl Encryptor {
    pub fn new(bundle: PublicBundle, expected_slots: usize, rng: SharedRng) -> Self {
        Self {
            bundle,
            expected_slots,
            rng,
        }
    }

    pub fn expected_slots(&self) -> usize {
        self.expected_slots
    }

    /// Encrypts a count vector, refusing counts too large to decode unambiguously.
    pub fn encrypt(
        &self,
        vector: &PlaintextVector,
        party: PartyTag,
    ) -> Result<CiphertextVector, FheError> {
        let limit = self.bundle.preset().param_set().max_decodable_count();
        if let Some((slot, value)) = vector
            .slots()
            .iter()
            .enumerate()
            .find(|(_, v)| **v > limit)
        {
            return Err(FheError::Range {
                slot,
                value: *value,
                limit,
            });
        }
        self.encrypt_slots(vector.slots(), party)
    }

    /// Encrypts raw slot values. Each value only has to lie in the plaintext
    /// space `[0, t)`; no count semantics are checked.
    pub fn encrypt_slots(
        &self,
        slots: &[u64],
        party: PartyTag,
    ) -> Result<CiphertextVector, FheError> {
        if slots.len() != self.expected_slots {
            return Err(FheError::Shape {
                expected: self.expected_slots,
                actual: slots.len(),
            });
        }

        let params = self.bundle.params();
        let t = params.plaintext();
        let mut encrypted = Vec::with_capacity(slots.len());
        for (slot, value) in slots.iter().enumerate() {
            if *value >= t {
                return Err(FheError::Range {
                    slot,
                    value: *value,
                    limit: t - 1,
                });
            }
            let input = vec![*value];
            let pt = Plaintext::try_encode(&input, Encoding::poly(), params)?;
            let ct = {
                let mut rng = lock_rng(&self.rng)?;
                self.bundle.public_key().try_encrypt(&pt, &mut *rng)?
            };
            encrypted.push(ct);
        }

        let vector =
            CiphertextVector::new(party, self.bundle.preset(), params.clone(), encrypted);
        info!(
            party = %vector.party(),
            slots = vector.len(),
            fingerprint = %vector.fingerprint(),
            "Encrypted count vector"
        );
        Ok(vector)
    }
}
