// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod common;

use anyhow::Result;
use common::{dataset, init_tracing, Harness, BRCA1, BRCA2};
use sg_config::AppConfig;
use sg_fhe::{create_shared_rng_from_seed, CiphertextVector, Encryptor, PublicBundle};
use sg_fhe_params::SecurityLevel;
use sg_genotype::{encode, AggregateResult, Frequency};
use sg_protocol::{PartyInput, ProtocolPhase, ProtocolRun};

fn assert_brca_scenario(result: &AggregateResult) -> Result<()> {
    assert_eq!(result.contributors, 2);

    let brca1 = result.variant(BRCA1).unwrap();
    assert_eq!(brca1.carrier_sum, 3);
    assert_eq!(brca1.total_sum, 15);
    assert!((brca1.frequency_value()? - 0.2).abs() < 1e-12);

    let brca2 = result.variant(BRCA2).unwrap();
    assert_eq!(brca2.carrier_sum, 1);
    assert_eq!(brca2.total_sum, 15);
    assert!((brca2.frequency_value()? - 0.0667).abs() < 1e-4);
    Ok(())
}

#[test]
fn test_brca_scenario_through_components() -> Result<()> {
    let h = Harness::new(2024)?;
    let a = h.party("party-a", &dataset("A", (2, 10), (0, 10)))?;
    let b = h.party("party-b", &dataset("B", (1, 5), (1, 5)))?;

    let aggregate = h.circuit.aggregate(vec![a, b])?;
    let result = h.decryptor.decrypt(&aggregate)?;
    assert_brca_scenario(&result)
}

#[test]
fn test_brca_scenario_through_protocol_run() -> Result<()> {
    init_tracing();
    let config = AppConfig {
        security: SecurityLevel::Insecure,
        ..AppConfig::default()
    };
    let mut run = ProtocolRun::new(config, create_shared_rng_from_seed(7))?;
    assert_eq!(run.phase(), ProtocolPhase::KeysGenerated);

    run.contribute_parties(vec![
        PartyInput::new("party-a", dataset("A", (2, 10), (0, 10))),
        PartyInput::new("party-b", dataset("B", (1, 5), (1, 5))),
    ])?;
    let result = run.finish()?;
    assert_brca_scenario(&result)
}

#[test]
fn test_brca_scenario_over_serialized_transport() -> Result<()> {
    let h = Harness::new(77)?;

    // Parties only ever see the exported public bundle.
    let bundle_bytes = h.bundle.to_bytes()?;
    let submissions = [
        ("party-a", dataset("A", (2, 10), (0, 10)), 1),
        ("party-b", dataset("B", (1, 5), (1, 5)), 2),
    ]
    .into_iter()
    .map(|(name, records, seed)| -> Result<Vec<u8>> {
        let bundle = PublicBundle::from_bytes(&bundle_bytes)?;
        let encryptor = Encryptor::new(bundle, 4, create_shared_rng_from_seed(seed));
        let vector = encode(&records, &h.panel)?;
        Ok(encryptor.encrypt(&vector, name.into())?.to_bytes()?)
    })
    .collect::<Result<Vec<_>>>()?;

    let received = submissions
        .iter()
        .map(|bytes| CiphertextVector::from_bytes(bytes, &h.bundle))
        .collect::<Result<Vec<_>, _>>()?;
    let aggregate = h.circuit.aggregate(received)?;
    assert_brca_scenario(&h.decryptor.decrypt(&aggregate)?)
}

#[test]
fn test_frequency_outcomes_stay_distinct_in_output() -> Result<()> {
    let h = Harness::new(31)?;
    let a = h.party("a", &dataset("A", (0, 6), (0, 0)))?;
    let result = h.decryptor.decrypt(&h.circuit.aggregate(vec![a])?)?;

    assert_eq!(
        result.variant(BRCA1).unwrap().frequency,
        Frequency::from_counts(0, 6)
    );
    assert_eq!(result.variant(BRCA1).unwrap().frequency_value()?, 0.0);
    assert_eq!(result.variant(BRCA2).unwrap().frequency, Frequency::Undefined);

    let json = serde_json::to_value(&result)?;
    assert_eq!(json["variants"][0]["frequency"]["status"], "computed");
    assert_eq!(json["variants"][1]["frequency"]["status"], "undefined");
    assert_eq!(json["variants"][0]["gene"], "BRCA1");
    assert_eq!(json["variants"][0]["locus"]["chromosome"], "17");
    assert_eq!(json["variants"][1]["gene"], "BRCA2");
    assert_eq!(json["variants"][1]["locus"]["position"], 32340300);
    Ok(())
}
