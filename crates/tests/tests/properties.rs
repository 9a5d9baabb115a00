// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod common;

use anyhow::Result;
use common::{calls, dataset, Harness, BRCA1, BRCA2};
use sg_aggregator::{combine, AggregateError, Aggregator};
use sg_decryptor::DecryptError;
use sg_fhe::{create_shared_rng_from_seed, EncryptedSlots, Encryptor, FheError, KeySet};
use sg_fhe_params::{select_preset, ParamsError, SecurityLevel};
use sg_genotype::{encode, Frequency, GenotypeError, GenotypeRecord, PlaintextVector, Zygosity};

fn counts(h: &Harness, result: &sg_genotype::AggregateResult) -> Vec<(u64, u64)> {
    h.panel
        .iter()
        .map(|v| {
            let f = result.variant(&v.name).unwrap();
            (f.carrier_sum, f.total_sum)
        })
        .collect()
}

#[test]
fn test_aggregate_is_permutation_invariant() -> Result<()> {
    let h = Harness::new(1)?;
    let datasets = [
        ("a", dataset("A", (1, 9), (0, 9))),
        ("b", dataset("B", (3, 12), (2, 11))),
        ("c", dataset("C", (0, 4), (1, 7))),
    ];
    let orders: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];

    let mut seen = Vec::new();
    for order in orders {
        let cts = order
            .iter()
            .map(|i| h.party(datasets[*i].0, &datasets[*i].1))
            .collect::<Result<Vec<_>>>()?;
        let result = h.decryptor.decrypt(&h.circuit.aggregate(cts)?)?;
        seen.push(counts(&h, &result));
    }
    assert!(seen.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(seen[0], vec![(4, 25), (3, 27)]);
    Ok(())
}

#[test]
fn test_combine_is_associative() -> Result<()> {
    let h = Harness::new(2)?;
    let lift = |name: &str, records: &[GenotypeRecord]| -> Result<_> {
        Ok(h.circuit.lift(h.party(name, records)?)?)
    };
    let a = dataset("A", (1, 3), (0, 3));
    let b = dataset("B", (2, 5), (1, 5));
    let c = dataset("C", (0, 2), (2, 2));

    let left = combine(combine(lift("a", &a)?, lift("b", &b)?)?, lift("c", &c)?)?;
    let right = combine(lift("a", &a)?, combine(lift("b", &b)?, lift("c", &c)?)?)?;

    let left = h.decryptor.decrypt(&left)?;
    let right = h.decryptor.decrypt(&right)?;
    assert_eq!(counts(&h, &left), counts(&h, &right));
    Ok(())
}

#[test]
fn test_streaming_equals_batch() -> Result<()> {
    let h = Harness::new(3)?;
    let parties = [
        ("a", dataset("A", (2, 10), (0, 10))),
        ("b", dataset("B", (1, 5), (1, 5))),
        ("c", dataset("C", (4, 8), (0, 6))),
    ];

    let mut aggregator = Aggregator::new(h.circuit.clone());
    for (name, records) in &parties {
        aggregator.submit(h.party(name, records)?)?;
    }
    let streamed = h.decryptor.decrypt(&aggregator.seal()?)?;

    let batch = parties
        .iter()
        .map(|(name, records)| h.party(name, records))
        .collect::<Result<Vec<_>>>()?;
    let batched = h.decryptor.decrypt(&h.circuit.aggregate(batch)?)?;

    assert_eq!(counts(&h, &streamed), counts(&h, &batched));
    Ok(())
}

#[test]
fn test_parallel_equals_sequential() -> Result<()> {
    let h = Harness::new(4)?;
    let build = || -> Result<Vec<_>> {
        (0..12)
            .map(|i| {
                let records = dataset(&format!("P{i}"), (i % 3, 5), (i % 2, 4));
                h.party(&format!("party-{i}"), &records)
            })
            .collect()
    };

    let sequential = h.decryptor.decrypt(&h.circuit.aggregate(build()?)?)?;
    let parallel = h.decryptor.decrypt(&h.circuit.aggregate_parallel(build()?)?)?;
    assert_eq!(counts(&h, &sequential), counts(&h, &parallel));
    assert_eq!(counts(&h, &parallel), vec![(12, 60), (6, 48)]);
    Ok(())
}

#[test]
fn test_single_party_roundtrip() -> Result<()> {
    let h = Harness::new(5)?;
    for slots in [vec![0, 0, 0, 0], vec![3, 7, 0, 2], vec![500, 500, 1, 9000]] {
        let vector = PlaintextVector::from_slots(slots.clone())?;
        let ct = h.encryptor.encrypt(&vector, "solo".into())?;
        let aggregate = h.circuit.aggregate(vec![ct])?;
        let result = h.decryptor.decrypt(&aggregate)?;
        let flat: Vec<u64> = counts(&h, &result)
            .into_iter()
            .flat_map(|(c, t)| [c, t])
            .collect();
        assert_eq!(flat, slots);
    }
    Ok(())
}

#[test]
fn test_shape_mismatch_produces_no_partial_result() -> Result<()> {
    let h = Harness::new(6)?;
    let good = h.party("good", &dataset("G", (1, 2), (1, 2)))?;
    let rng = create_shared_rng_from_seed(60);
    let short = Encryptor::new(h.bundle.clone(), 2, rng).encrypt_slots(&[1, 2], "short".into())?;

    let err = h.circuit.aggregate(vec![good, short]).unwrap_err();
    assert_eq!(
        err,
        AggregateError::Shape {
            party: "short".into(),
            expected: 4,
            actual: 2,
        }
    );
    Ok(())
}

#[test]
fn test_parameter_mismatch_is_rejected() -> Result<()> {
    let h = Harness::new(7)?;
    let rng = create_shared_rng_from_seed(70);
    let (other, _) = KeySet::generate(SecurityLevel::Bits128, 0, &rng)?.split();
    let foreign = Encryptor::new(other, 4, rng).encrypt_slots(&[1, 2, 1, 2], "foreign".into())?;

    assert!(matches!(
        h.circuit.aggregate(vec![foreign]),
        Err(AggregateError::ParameterMismatch { .. })
    ));
    Ok(())
}

#[test]
fn test_unobserved_variant_is_undefined_across_parties() -> Result<()> {
    let h = Harness::new(8)?;
    let cts = vec![
        h.party("a", &calls("A", BRCA1, 1, 4))?,
        h.party("b", &calls("B", BRCA1, 0, 6))?,
    ];
    let result = h.decryptor.decrypt(&h.circuit.aggregate(cts)?)?;
    let brca2 = result.variant(BRCA2).unwrap();
    assert_eq!(brca2.total_sum, 0);
    assert_eq!(brca2.frequency, Frequency::Undefined);
    assert!(brca2.frequency_value().is_err());
    Ok(())
}

#[test]
fn test_range_guard_trips_on_implausible_total() -> Result<()> {
    let h = Harness::with_ceiling(9, 20)?;
    let cts = vec![
        h.party("a", &dataset("A", (2, 15), (0, 1)))?,
        h.party("b", &dataset("B", (1, 10), (0, 1)))?,
    ];
    let err = h.decryptor.decrypt(&h.circuit.aggregate(cts)?).unwrap_err();
    assert!(matches!(
        err,
        DecryptError::Range {
            slot: 1,
            value: 25,
            ceiling: 20,
            ..
        }
    ));
    Ok(())
}

#[test]
fn test_range_guard_catches_wraparound() -> Result<()> {
    let h = Harness::new(10)?;
    let t = h.bundle.params().plaintext();
    // A slot at t - 3 decodes to -3 in centered form.
    let ct = h.encryptor.encrypt_slots(&[0, t - 3, 0, 1], "wrapped".into())?;
    let aggregate = h.circuit.aggregate(vec![ct])?;
    assert_eq!(aggregate.slots().len(), 4);
    assert!(matches!(
        h.decryptor.decrypt(&aggregate),
        Err(DecryptError::Range { value: -3, .. })
    ));
    Ok(())
}

#[test]
fn test_unsupportable_parameters_fail_at_key_generation() {
    let rng = create_shared_rng_from_seed(11);
    assert!(matches!(
        select_preset(SecurityLevel::Insecure, 2),
        Err(ParamsError::UnsupportedDepth { .. })
    ));
    assert!(matches!(
        KeySet::generate(SecurityLevel::Bits128, 50, &rng),
        Err(FheError::Parameter(ParamsError::UnsupportedDepth { .. }))
    ));
}

#[test]
fn test_duplicate_sample_fails_encoding() {
    let mut records = calls("A", BRCA1, 1, 3);
    records.push(GenotypeRecord::new("A-1", BRCA1, Zygosity::Homozygous));
    let panel = sg_genotype::VariantPanel::brca();
    assert!(matches!(
        encode(&records, &panel),
        Err(GenotypeError::DuplicateSample { .. })
    ));
}
