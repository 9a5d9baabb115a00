// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::{load_records, print_result};
use anyhow::{Context, Result};
use sg_config::AppConfig;
use sg_fhe::{create_shared_rng_from_entropy, create_shared_rng_from_seed};
use sg_protocol::{PartyInput, ProtocolRun};
use std::path::PathBuf;
use tracing::{info, warn};

pub fn execute(
    config: AppConfig,
    parties: Vec<(String, PathBuf)>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let inputs = parties
        .into_iter()
        .map(|(name, path)| {
            let records = load_records(&path)?;
            info!(party = %name, records = records.len(), "Loaded party records");
            Ok(PartyInput::new(name, records))
        })
        .collect::<Result<Vec<_>>>()?;

    let rng = match seed {
        Some(seed) => {
            warn!("Using a fixed RNG seed; keys are reproducible and must not protect real data");
            create_shared_rng_from_seed(seed)
        }
        None => create_shared_rng_from_entropy(),
    };

    let mut run = ProtocolRun::new(config, rng).context("Could not set up the protocol run")?;
    run.contribute_parties(inputs)
        .context("Party contributions were rejected")?;
    let result = run.finish().context("Could not decrypt the aggregate")?;

    print_result(&result, json)
}
