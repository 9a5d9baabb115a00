// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::ciphertext::EncryptedSlots;
use crate::utils::{lock_rng, SharedRng};
use crate::FheError;
use fhe::bfv::{BfvParameters, Encoding, PublicKey, RelinearizationKey, SecretKey};
use fhe_traits::{DeserializeParametrized, FheDecoder, FheDecrypter, Serialize};
use serde::{Deserialize, Serialize as SerdeSerialize};
use sg_fhe_params::{select_preset, BfvPreset, SecurityLevel};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};
use zeroize::Zeroize;

/// Everything the data-owning parties and the aggregator may see.
#[derive(Clone)]
pub struct PublicBundle {
    preset: BfvPreset,
    params: Arc<BfvParameters>,
    public_key: Arc<PublicKey>,
    evaluation_key: Arc<RelinearizationKey>,
}

#[derive(SerdeSerialize, Deserialize)]
struct PublicBundleData {
    preset: String,
    public_key: Vec<u8>,
    evaluation_key: Vec<u8>,
}

impl PublicBundle {
    pub fn preset(&self) -> BfvPreset {
        self.preset
    }

    pub fn params(&self) -> &Arc<BfvParameters> {
        &self.params
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Relinearization key. Sums never need it; it is shipped so the
    /// aggregator can evaluate circuits with multiplications.
    pub fn evaluation_key(&self) -> &RelinearizationKey {
        &self.evaluation_key
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, FheError> {
        Ok(bincode::serialize(&PublicBundleData {
            preset: self.preset.name().to_string(),
            public_key: self.public_key.to_bytes(),
            evaluation_key: self.evaluation_key.to_bytes(),
        })?)
    }

    /// Parameters are rebuilt from the preset name rather than trusted from the wire.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FheError> {
        let PublicBundleData {
            preset,
            public_key,
            evaluation_key,
        } = bincode::deserialize(bytes)?;
        let preset = BfvPreset::from_name(&preset)?;
        let params = preset.build_arc()?;
        let public_key = PublicKey::from_bytes(&public_key, &params)?;
        let evaluation_key = RelinearizationKey::from_bytes(&evaluation_key, &params)?;
        Ok(Self {
            preset,
            params,
            public_key: Arc::new(public_key),
            evaluation_key: Arc::new(evaluation_key),
        })
    }
}

impl fmt::Debug for PublicBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicBundle")
            .field("preset", &self.preset)
            .finish_non_exhaustive()
    }
}

/// The only handle able to turn ciphertexts back into counts.
///
/// Cannot be cloned and has no accessor for the key material. The secret
/// coefficients are wiped when the key is dropped.
pub struct DecryptionKey {
    preset: BfvPreset,
    params: Arc<BfvParameters>,
    secret: SecretKey,
}

impl DecryptionKey {
    pub fn preset(&self) -> BfvPreset {
        self.preset
    }

    pub fn params(&self) -> &Arc<BfvParameters> {
        &self.params
    }

    /// Decrypts every slot and returns the constant coefficient of each, in `[0, t)`.
    pub fn decrypt_slots<E: EncryptedSlots + ?Sized>(
        &self,
        encrypted: &E,
    ) -> Result<Vec<u64>, FheError> {
        if encrypted.params() != &self.params {
            return Err(FheError::ParameterMismatch(
                "ciphertext was produced under a different parameter set than the key".into(),
            ));
        }

        let mut values = Vec::with_capacity(encrypted.slots().len());
        for ct in encrypted.slots() {
            let pt = self.secret.try_decrypt(ct)?;
            let decoded = Vec::<u64>::try_decode(&pt, Encoding::poly())?;
            values.push(decoded.first().copied().unwrap_or_default());
        }
        debug!(slots = values.len(), "Decrypted slots");
        Ok(values)
    }
}

impl Drop for DecryptionKey {
    fn drop(&mut self) {
        self.secret.coeffs.zeroize();
    }
}

impl fmt::Debug for DecryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptionKey")
            .field("preset", &self.preset)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Freshly generated key material for one protocol run.
#[derive(Debug)]
pub struct KeySet {
    public: PublicBundle,
    decryption: DecryptionKey,
}

impl KeySet {
    /// Picks the smallest preset meeting `level` that supports `depth`
    /// multiplications, then samples a fresh key pair.
    pub fn generate(level: SecurityLevel, depth: usize, rng: &SharedRng) -> Result<Self, FheError> {
        let preset = select_preset(level, depth)?;
        Self::for_preset(preset, rng)
    }

    pub fn for_preset(preset: BfvPreset, rng: &SharedRng) -> Result<Self, FheError> {
        preset.check_security()?;
        let params = preset.build_arc()?;

        let (secret, public_key, evaluation_key) = {
            let mut rng = lock_rng(rng)?;
            let secret = SecretKey::random(&params, &mut *rng);
            let public_key = PublicKey::new(&secret, &mut *rng);
            let evaluation_key = RelinearizationKey::new(&secret, &mut *rng)?;
            (secret, public_key, evaluation_key)
        };

        info!(preset = %preset, degree = params.degree(), "Generated key set");

        Ok(Self {
            public: PublicBundle {
                preset,
                params: params.clone(),
                public_key: Arc::new(public_key),
                evaluation_key: Arc::new(evaluation_key),
            },
            decryption: DecryptionKey {
                preset,
                params,
                secret,
            },
        })
    }

    pub fn public_bundle(&self) -> &PublicBundle {
        &self.public
    }

    /// Hands the public half to the parties and the aggregator and the
    /// decryption key to the result holder.
    pub fn split(self) -> (PublicBundle, DecryptionKey) {
        (self.public, self.decryption)
    }
}
