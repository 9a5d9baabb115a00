// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{ProtocolError, ProtocolPhase};
use rayon::prelude::*;
use sg_aggregator::{AggregationCircuit, Aggregator};
use sg_config::AppConfig;
use sg_decryptor::Decryptor;
use sg_fhe::{CiphertextVector, Encryptor, KeySet, PartyTag, PublicBundle, SharedRng};
use sg_genotype::{encode, AggregateResult, GenotypeRecord};
use tracing::{info, warn};

/// One data holder's input to a run.
#[derive(Debug, Clone)]
pub struct PartyInput {
    pub tag: PartyTag,
    pub records: Vec<GenotypeRecord>,
}

impl PartyInput {
    pub fn new(tag: impl Into<PartyTag>, records: Vec<GenotypeRecord>) -> Self {
        Self {
            tag: tag.into(),
            records,
        }
    }
}

/// A full protocol run inside one process: key generation, per-party encoding
/// and encryption, aggregation and the final decryption.
pub struct ProtocolRun {
    config: AppConfig,
    phase: ProtocolPhase,
    bundle: PublicBundle,
    encryptor: Encryptor,
    aggregator: Aggregator,
    decryptor: Decryptor,
}

impl ProtocolRun {
    /// Generates the run's keys. Fails before any data is touched when the
    /// configured security level and depth have no preset.
    pub fn new(config: AppConfig, rng: SharedRng) -> Result<Self, ProtocolError> {
        let keys = KeySet::generate(config.security, config.multiplicative_depth, &rng)?;
        let (bundle, key) = keys.split();

        let slots = config.variants.slot_count();
        let circuit = AggregationCircuit::new(&bundle, slots);
        let aggregator = Aggregator::new(circuit).with_parallel(config.parallel_aggregation);
        let decryptor =
            Decryptor::new(key, config.variants.clone(), config.max_plausible_samples)?;
        let encryptor = Encryptor::new(bundle.clone(), slots, rng);

        info!(preset = %bundle.preset(), slots, "Protocol run initialised");
        Ok(Self {
            config,
            phase: ProtocolPhase::KeysGenerated,
            bundle,
            encryptor,
            aggregator,
            decryptor,
        })
    }

    pub fn phase(&self) -> ProtocolPhase {
        self.phase
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// What gets distributed to the parties and the aggregator.
    pub fn public_bundle(&self) -> &PublicBundle {
        &self.bundle
    }

    /// Encryptor for parties that encrypt on their own and [`ProtocolRun::submit`].
    pub fn encryptor(&self) -> &Encryptor {
        &self.encryptor
    }

    pub fn contributor_count(&self) -> usize {
        self.aggregator.contributor_count()
    }

    fn transition(&mut self, next: ProtocolPhase) -> Result<(), ProtocolError> {
        if !self.phase.can_transition_to(next) {
            return Err(ProtocolError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        self.phase = next;
        Ok(())
    }

    fn check_party_limit(&self, incoming: usize) -> Result<(), ProtocolError> {
        let requested = self.aggregator.contributor_count() + incoming;
        if requested > self.config.max_parties {
            return Err(ProtocolError::TooManyParties {
                max: self.config.max_parties,
                requested,
            });
        }
        Ok(())
    }

    /// Walks a fresh run through encoding and encryption into aggregation.
    /// A run already aggregating stays there.
    fn enter_aggregation(&mut self) -> Result<(), ProtocolError> {
        if self.phase == ProtocolPhase::Aggregating {
            return Ok(());
        }
        for next in [
            ProtocolPhase::PartiesEncoding,
            ProtocolPhase::PartiesEncrypting,
            ProtocolPhase::Aggregating,
        ] {
            self.transition(next)?;
        }
        Ok(())
    }

    fn check_can_contribute(&self) -> Result<(), ProtocolError> {
        match self.phase {
            ProtocolPhase::KeysGenerated | ProtocolPhase::Aggregating => Ok(()),
            from => Err(ProtocolError::InvalidTransition {
                from,
                to: ProtocolPhase::Aggregating,
            }),
        }
    }

    /// Encodes and encrypts every party in parallel, then submits the batch.
    /// Any failing party rejects the whole batch and names the party. The
    /// whole batch is checked before the phase moves, so a rejected call
    /// leaves the run as it was.
    pub fn contribute_parties(
        &mut self,
        parties: Vec<PartyInput>,
    ) -> Result<usize, ProtocolError> {
        self.check_can_contribute()?;
        self.check_party_limit(parties.len())?;

        let panel = &self.config.variants;
        let encoded = parties
            .into_par_iter()
            .map(|PartyInput { tag, records }| match encode(&records, panel) {
                Ok(vector) => Ok((tag, vector)),
                Err(source) => Err(ProtocolError::Encode { party: tag, source }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let encryptor = &self.encryptor;
        let ciphertexts = encoded
            .into_par_iter()
            .map(|(tag, vector)| {
                encryptor
                    .encrypt(&vector, tag.clone())
                    .map_err(|source| ProtocolError::Encrypt { party: tag, source })
            })
            .collect::<Result<Vec<CiphertextVector>, _>>()?;
        self.aggregator.check_batch(&ciphertexts)?;

        self.enter_aggregation()?;
        let accepted = self.aggregator.try_submit_batch(ciphertexts)?;
        info!(accepted, total = self.contributor_count(), "Parties contributed");
        Ok(accepted)
    }

    /// Accepts one ciphertext produced outside the run. A rejected ciphertext
    /// leaves the aggregate untouched, so the run can go on without that party.
    pub fn submit(&mut self, ct: CiphertextVector) -> Result<(), ProtocolError> {
        self.check_can_contribute()?;
        self.check_party_limit(1)?;
        if let Err(e) = self.aggregator.check_batch(std::slice::from_ref(&ct)) {
            warn!(party = %ct.party(), "Contribution excluded from the aggregate");
            return Err(e.into());
        }
        self.enter_aggregation()?;
        self.aggregator.submit(ct)?;
        Ok(())
    }

    /// Seals the aggregate and decrypts it. The decryption key is dropped,
    /// and wiped, when the run ends here.
    pub fn finish(mut self) -> Result<AggregateResult, ProtocolError> {
        self.transition(ProtocolPhase::Decrypting)?;
        let aggregate = self.aggregator.seal()?;
        let result = self.decryptor.decrypt(&aggregate)?;
        self.transition(ProtocolPhase::Resulted)?;
        info!(contributors = result.contributors, "Protocol run complete");
        Ok(result)
    }
}
