// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

#![allow(dead_code)]

use anyhow::Result;
use sg_aggregator::AggregationCircuit;
use sg_decryptor::Decryptor;
use sg_fhe::{
    create_shared_rng_from_seed, BfvPreset, CiphertextVector, Encryptor, KeySet, PublicBundle,
};
use sg_genotype::{encode, GenotypeRecord, VariantPanel, Zygosity};
use std::sync::Once;

pub const BRCA1: &str = "rs80357382";
pub const BRCA2: &str = "rs80359550";

static TRACING: Once = Once::new();

pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Everything the roles of one run need, keyed on the fast insecure preset.
pub struct Harness {
    pub bundle: PublicBundle,
    pub encryptor: Encryptor,
    pub circuit: AggregationCircuit,
    pub decryptor: Decryptor,
    pub panel: VariantPanel,
}

impl Harness {
    pub fn new(seed: u64) -> Result<Self> {
        Self::with_ceiling(seed, 10_000)
    }

    pub fn with_ceiling(seed: u64, ceiling: u64) -> Result<Self> {
        init_tracing();
        let rng = create_shared_rng_from_seed(seed);
        let panel = VariantPanel::brca();
        let (bundle, key) = KeySet::for_preset(BfvPreset::InsecureBfv512, &rng)?.split();
        Ok(Self {
            encryptor: Encryptor::new(bundle.clone(), panel.slot_count(), rng),
            circuit: AggregationCircuit::new(&bundle, panel.slot_count()),
            decryptor: Decryptor::new(key, panel.clone(), ceiling)?,
            bundle,
            panel,
        })
    }

    /// Encodes and encrypts one party's records.
    pub fn party(&self, name: &str, records: &[GenotypeRecord]) -> Result<CiphertextVector> {
        let vector = encode(records, &self.panel)?;
        Ok(self.encryptor.encrypt(&vector, name.into())?)
    }
}

/// `carriers` heterozygous and `observed - carriers` reference calls for one
/// variant, with sample ids prefixed by `prefix`.
pub fn calls(prefix: &str, variant: &str, carriers: usize, observed: usize) -> Vec<GenotypeRecord> {
    (0..observed)
        .map(|i| {
            let zygosity = if i < carriers {
                Zygosity::Heterozygous
            } else {
                Zygosity::Absent
            };
            GenotypeRecord::new(format!("{prefix}-{i}"), variant, zygosity)
        })
        .collect()
}

/// Records of a party with the given (carriers, observed) per BRCA variant.
pub fn dataset(prefix: &str, brca1: (usize, usize), brca2: (usize, usize)) -> Vec<GenotypeRecord> {
    let mut records = calls(prefix, BRCA1, brca1.0, brca1.1);
    records.extend(calls(prefix, BRCA2, brca2.0, brca2.1));
    records
}
