// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{bail, Context, Result};
use sg_genotype::{AggregateResult, GenotypeRecord};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub mod telemetry;

/// Parse a `name=path` party argument
pub fn parse_party(s: &str) -> Result<(String, PathBuf)> {
    let Some((name, path)) = s.split_once('=') else {
        bail!("party must be given as NAME=RECORDS, got '{s}'");
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("party name must not be empty");
    }
    if path.is_empty() {
        bail!("records path for party '{name}' must not be empty");
    }
    Ok((name.to_string(), PathBuf::from(path)))
}

/// Read a JSON array of `{sample_id, variant, genotype}` records.
pub fn load_records(path: &Path) -> Result<Vec<GenotypeRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Could not open records file {}", path.display()))?;
    let records = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Could not parse records file {}", path.display()))?;
    Ok(records)
}

pub fn print_result(result: &AggregateResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("contributors: {}", result.contributors);
    for line in result_table(result) {
        println!("{line}");
    }
    Ok(())
}

fn result_table(result: &AggregateResult) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<14} {:<8} {:<14} {:>10} {:>10} {:>12}",
        "variant", "gene", "position", "carriers", "observed", "frequency"
    )];
    for variant in &result.variants {
        lines.push(format!(
            "{:<14} {:<8} {:<14} {:>10} {:>10} {:>12}",
            variant.variant_name,
            variant.gene,
            variant.locus.to_string(),
            variant.carrier_sum,
            variant.total_sum,
            variant.frequency.to_string()
        ));
    }
    lines
}
