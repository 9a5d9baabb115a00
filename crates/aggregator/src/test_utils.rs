// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{AggregateCiphertext, AggregationCircuit};
use sg_fhe::{
    create_shared_rng_from_seed, BfvPreset, CiphertextVector, DecryptionKey, Encryptor, KeySet,
    PublicBundle, SharedRng,
};

pub struct Fixture {
    pub bundle: PublicBundle,
    pub key: DecryptionKey,
    pub circuit: AggregationCircuit,
    encryptor: Encryptor,
    rng: SharedRng,
}

impl Fixture {
    pub fn new(seed: u64) -> anyhow::Result<Self> {
        let rng = create_shared_rng_from_seed(seed);
        let (bundle, key) = KeySet::for_preset(BfvPreset::InsecureBfv512, &rng)?.split();
        Ok(Self {
            circuit: AggregationCircuit::new(&bundle, 4),
            encryptor: Encryptor::new(bundle.clone(), 4, rng.clone()),
            bundle,
            key,
            rng,
        })
    }

    pub fn encrypt(&self, party: &str, slots: &[u64]) -> anyhow::Result<CiphertextVector> {
        Ok(self.encryptor.encrypt_slots(slots, party.into())?)
    }

    pub fn encryptor_with_slots(&self, slots: usize) -> Encryptor {
        Encryptor::new(self.bundle.clone(), slots, self.rng.clone())
    }
}

pub fn decrypt(key: &DecryptionKey, aggregate: &AggregateCiphertext) -> anyhow::Result<Vec<u64>> {
    Ok(key.decrypt_slots(aggregate)?)
}
