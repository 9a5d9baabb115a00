// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::{load_records, print_result};
use anyhow::Result;
use sg_config::AppConfig;
use sg_genotype::{encode, local_frequencies};
use std::path::Path;

pub fn execute(config: &AppConfig, records: &Path, json: bool) -> Result<()> {
    let records = load_records(records)?;
    let vector = encode(&records, &config.variants)?;
    let result = local_frequencies(&vector, &config.variants)?;
    print_result(&result, json)
}
